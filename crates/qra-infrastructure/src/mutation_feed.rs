//! Channel-fed mutation source.
//!
//! The embedding page (or a test) pushes inserted nodes through a
//! [`MutationFeed`]; the observer receives them as an insertion stream.

use futures::StreamExt;
use std::sync::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use qra_core::dom::{MutationBatch, MutationSource, ObservedSubtree};

/// Sender side: reports insertions below the observed container.
#[derive(Clone)]
pub struct MutationFeed {
    tx: UnboundedSender<MutationBatch>,
}

impl MutationFeed {
    /// Delivers a batch; returns `false` once the observer has gone away.
    pub fn push(&self, batch: MutationBatch) -> bool {
        self.tx.send(batch).is_ok()
    }

    /// Delivers a single inserted node.
    pub fn insert(&self, node_html: impl Into<String>) -> bool {
        self.push(MutationBatch::single(node_html))
    }
}

/// A single container whose insertions arrive over a channel.
///
/// The insertion stream can be handed out once; a second observation finds
/// nothing to observe.
pub struct ChannelMutationSource {
    container_id: String,
    current_html: Mutex<String>,
    receiver: Mutex<Option<UnboundedReceiver<MutationBatch>>>,
}

impl ChannelMutationSource {
    pub fn new(
        container_id: impl Into<String>,
        current_html: impl Into<String>,
    ) -> (Self, MutationFeed) {
        let (tx, rx) = mpsc::unbounded_channel();
        let source = Self {
            container_id: container_id.into(),
            current_html: Mutex::new(current_html.into()),
            receiver: Mutex::new(Some(rx)),
        };
        (source, MutationFeed { tx })
    }
}

impl MutationSource for ChannelMutationSource {
    fn observe(&self, container_id: &str) -> Option<ObservedSubtree> {
        if container_id != self.container_id {
            return None;
        }

        let Some(rx) = self
            .receiver
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        else {
            tracing::warn!("Container #{} is already being observed", container_id);
            return None;
        };

        let current_html = self
            .current_html
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        let insertions = futures::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|batch| (batch, rx))
        })
        .boxed();

        Some(ObservedSubtree {
            current_html,
            insertions,
        })
    }
}

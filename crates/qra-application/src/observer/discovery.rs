//! The live stream of discovered buttons.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use qra_core::dom::ObservedSubtree;
use qra_core::quick_reply::{DiscoveryRegistry, QuickReplyItem};

use super::scanner::ButtonScanner;

/// Ends a [`ButtonDiscovery`] from anywhere.
#[derive(Debug, Clone)]
pub struct DiscoveryHandle {
    cancel: CancellationToken,
}

impl DiscoveryHandle {
    /// Stops discovery; the stream ends at its next poll.
    pub fn unsubscribe(&self) {
        if !self.cancel.is_cancelled() {
            tracing::info!("Stopping button discovery");
        }
        self.cancel.cancel();
    }

    pub fn is_unsubscribed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Discovered items in detection order: the initial scan first, then every
/// button found in later insertions.
///
/// The stream is lazy and ends only when the insertion source closes or the
/// subscription is cancelled. It cannot be restarted.
pub struct ButtonDiscovery {
    items: BoxStream<'static, QuickReplyItem>,
    cancel: CancellationToken,
}

impl ButtonDiscovery {
    pub(super) fn start(scanner: Arc<ButtonScanner>, subtree: ObservedSubtree) -> Self {
        let ObservedSubtree {
            current_html,
            insertions,
        } = subtree;

        let initial = scanner.scan(&current_html);
        tracing::debug!("Initial button scan found {} candidates", initial.len());

        let live = insertions.flat_map(move |batch| stream::iter(scanner.scan_batch(&batch)));

        let cancel = CancellationToken::new();
        let items = stream::iter(initial)
            .chain(live)
            .take_until(cancel.clone().cancelled_owned())
            .boxed();

        Self { items, cancel }
    }

    pub fn handle(&self) -> DiscoveryHandle {
        DiscoveryHandle {
            cancel: self.cancel.clone(),
        }
    }

    /// Registers every discovered item until the stream ends.
    ///
    /// Returns how many items the registry admitted.
    pub async fn drain_into(mut self, registry: &DiscoveryRegistry) -> usize {
        let mut admitted = 0;
        while let Some(item) = self.next().await {
            if registry.register(item).await {
                admitted += 1;
            }
        }
        tracing::info!("Button discovery ended ({} items admitted)", admitted);
        admitted
    }

    /// Drains into `registry` on a background task.
    pub fn spawn_drain(self, registry: DiscoveryRegistry) -> JoinHandle<usize> {
        tokio::spawn(async move { self.drain_into(&registry).await })
    }
}

impl Stream for ButtonDiscovery {
    type Item = QuickReplyItem;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.items.poll_next_unpin(cx)
    }
}

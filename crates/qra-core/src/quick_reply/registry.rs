//! Session-scoped registry of discovered quick replies.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::model::QuickReplyItem;

#[derive(Debug, Default)]
struct RegistryState {
    labels: HashSet<String>,
    items: Vec<QuickReplyItem>,
}

/// Registry of items admitted by button discovery during the current session.
///
/// Labels are write-once: the first registration of a label wins and later
/// registrations with the same label are dropped without touching the stored
/// item. Items keep their registration order and are never removed, except by
/// an explicit [`DiscoveryRegistry::reset`].
///
/// The handle is cheap to clone; all clones share the same state. The
/// discovery task is the single writer, aggregation reads snapshots.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryRegistry {
    state: Arc<RwLock<RegistryState>>,
}

impl DiscoveryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an item, returning `true` if its label was not yet admitted.
    ///
    /// Matching is exact on the label as given; callers trim labels before
    /// registering.
    pub async fn register(&self, item: QuickReplyItem) -> bool {
        let mut state = self.state.write().await;
        if state.labels.contains(&item.label) {
            tracing::debug!("Skipping duplicate discovered label: '{}'", item.label);
            return false;
        }

        tracing::debug!("Registered discovered label: '{}'", item.label);
        state.labels.insert(item.label.clone());
        state.items.push(item);
        true
    }

    /// Returns a copy of the registered items in registration order.
    pub async fn snapshot(&self) -> Vec<QuickReplyItem> {
        self.state.read().await.items.clone()
    }

    /// Returns true if the label has already been admitted.
    pub async fn contains(&self, label: &str) -> bool {
        self.state.read().await.labels.contains(label)
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.items.is_empty()
    }

    /// Forgets every discovered item and label.
    ///
    /// Nothing calls this implicitly; hosts that want a per-conversation
    /// registry call it when the conversation changes.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        let dropped = state.items.len();
        state.labels.clear();
        state.items.clear();
        tracing::info!("Discovery registry reset ({} items dropped)", dropped);
    }
}

//! Merging catalog replies with discovered buttons.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use qra_core::catalog::CatalogProvider;
use qra_core::quick_reply::{DiscoveryRegistry, QuickReplyItem};

use crate::catalog_reader::{CatalogSnapshot, HostReplyCatalogReader};

/// The two menu lists.
///
/// `chat` never holds two items with the same label, and no label appears in
/// both lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregatedReplies {
    pub chat: Vec<QuickReplyItem>,
    pub global: Vec<QuickReplyItem>,
}

impl AggregatedReplies {
    /// Finds an item by label, chat scope first.
    pub fn find(&self, label: &str) -> Option<&QuickReplyItem> {
        self.chat
            .iter()
            .chain(self.global.iter())
            .find(|item| item.label == label)
    }

    pub fn is_empty(&self) -> bool {
        self.chat.is_empty() && self.global.is_empty()
    }
}

/// Merges catalog items with discovered items.
///
/// Chat keeps the first catalog item per label, followed by discovered items
/// whose labels are still unseen. Global keeps catalog order minus any label
/// that ended up in chat, including labels contributed by discovery.
pub fn merge(catalog: CatalogSnapshot, discovered: Vec<QuickReplyItem>) -> AggregatedReplies {
    let mut seen: HashSet<String> = HashSet::new();

    let mut chat: Vec<QuickReplyItem> = catalog
        .chat
        .into_iter()
        .filter(|item| seen.insert(item.label.clone()))
        .collect();

    for item in discovered {
        if seen.insert(item.label.clone()) {
            chat.push(item);
        } else {
            tracing::debug!("Discovered label '{}' already present in chat", item.label);
        }
    }

    let global: Vec<QuickReplyItem> = catalog
        .global
        .into_iter()
        .filter(|item| !seen.contains(&item.label))
        .collect();

    AggregatedReplies { chat, global }
}

/// Produces the menu lists on demand.
///
/// Every [`AggregationEngine::fetch`] re-reads the catalog and takes a fresh
/// registry snapshot; nothing is cached.
#[derive(Clone)]
pub struct AggregationEngine {
    reader: HostReplyCatalogReader,
    registry: DiscoveryRegistry,
}

impl AggregationEngine {
    pub fn new(provider: Arc<dyn CatalogProvider>, registry: DiscoveryRegistry) -> Self {
        Self {
            reader: HostReplyCatalogReader::new(provider),
            registry,
        }
    }

    pub fn registry(&self) -> &DiscoveryRegistry {
        &self.registry
    }

    pub async fn fetch(&self) -> AggregatedReplies {
        let catalog = self.reader.fetch().await;
        let discovered = self.registry.snapshot().await;
        let replies = merge(catalog, discovered);
        tracing::debug!(
            "Aggregated quick replies - chat: {}, global: {}",
            replies.chat.len(),
            replies.global.len()
        );
        replies
    }
}

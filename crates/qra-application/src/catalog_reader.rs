//! Read-only access to the host quick reply catalog.

use std::sync::Arc;

use qra_core::catalog::{CatalogParse, CatalogProvider, CatalogStatus, parse_catalog};
use qra_core::quick_reply::QuickReplyItem;

/// Catalog items split by scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub chat: Vec<QuickReplyItem>,
    pub global: Vec<QuickReplyItem>,
}

/// Reads the host catalog without ever failing.
///
/// A missing host catalog, a disabled one, or a read error all degrade to an
/// empty snapshot; the cause is logged.
#[derive(Clone)]
pub struct HostReplyCatalogReader {
    provider: Arc<dyn CatalogProvider>,
}

impl HostReplyCatalogReader {
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self { provider }
    }

    /// Returns the admitted chat-scope and global-scope items.
    pub async fn fetch(&self) -> CatalogSnapshot {
        let parse = self.read().await;
        CatalogSnapshot {
            chat: parse.chat,
            global: parse.global,
        }
    }

    /// Returns the full parse, including skipped elements.
    pub async fn read(&self) -> CatalogParse {
        let root = match self.provider.snapshot().await {
            Ok(Some(root)) => root,
            Ok(None) => {
                tracing::error!("Quick reply catalog not found; cannot fetch standard replies");
                return CatalogParse::unavailable("host catalog not found");
            }
            Err(e) => {
                tracing::error!("Error fetching standard quick replies: {}", e);
                return CatalogParse::unavailable(e.to_string());
            }
        };

        let parse = parse_catalog(&root);
        match &parse.status {
            CatalogStatus::Enabled => tracing::debug!(
                "Fetched standard replies - chat: {}, global: {}, skipped: {}",
                parse.chat.len(),
                parse.global.len(),
                parse.skipped.len()
            ),
            CatalogStatus::Disabled => {
                tracing::info!("Quick replies are disabled by the host; skipping standard replies")
            }
            CatalogStatus::Malformed(detail) | CatalogStatus::Unavailable(detail) => {
                tracing::error!("Unusable quick reply catalog: {}", detail)
            }
        }
        parse
    }

    /// Whether the host catalog exists and is enabled.
    pub async fn is_enabled(&self) -> bool {
        match self.provider.snapshot().await {
            Ok(Some(root)) => root.is_object() && qra_core::catalog::catalog_enabled(&root),
            Ok(None) => false,
            Err(e) => {
                tracing::error!("Error reading quick reply catalog: {}", e);
                false
            }
        }
    }
}

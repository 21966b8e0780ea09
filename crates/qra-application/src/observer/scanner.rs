//! Button matching over HTML fragments.

use scraper::{Html, Selector};

use qra_core::QraError;
use qra_core::dom::MutationBatch;
use qra_core::error::Result;
use qra_core::quick_reply::QuickReplyItem;

use super::ObserverConfig;

/// Finds third-party buttons in markup and turns them into discovered items.
///
/// Parsing is synchronous and the parsed document never outlives a call, so the
/// scanner itself can be shared freely across tasks.
#[derive(Debug)]
pub struct ButtonScanner {
    container: Selector,
    button: Selector,
    set_name: String,
    message_prefix: String,
}

impl ButtonScanner {
    pub fn new(config: &ObserverConfig) -> Result<Self> {
        Ok(Self {
            container: parse_selector(&config.container_selector)?,
            button: parse_selector(&config.button_selector)?,
            set_name: config.set_name.clone(),
            message_prefix: config.message_prefix.clone(),
        })
    }

    /// Scans one fragment: every button below every matching container.
    ///
    /// A container may be the fragment's top node or any of its descendants.
    /// Only elements strictly inside a container count as buttons.
    pub fn scan(&self, html: &str) -> Vec<QuickReplyItem> {
        let fragment = Html::parse_fragment(html);
        let mut items = Vec::new();

        for container in fragment.select(&self.container) {
            for button in container.select(&self.button) {
                if button.id() == container.id() {
                    continue;
                }
                let text: String = button.text().collect();
                let label = text.trim();
                if label.is_empty() {
                    tracing::debug!("Skipping discovered button without a label");
                    continue;
                }
                items.push(self.item_for(label));
            }
        }

        items
    }

    /// Scans only the nodes added in `batch`, in insertion order.
    pub fn scan_batch(&self, batch: &MutationBatch) -> Vec<QuickReplyItem> {
        batch
            .added_nodes
            .iter()
            .flat_map(|node| self.scan(node))
            .collect()
    }

    fn item_for(&self, label: &str) -> QuickReplyItem {
        QuickReplyItem::discovered(
            self.set_name.clone(),
            label,
            format!("{} {}", self.message_prefix, label),
        )
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| QraError::config(format!("Invalid selector '{}': {:?}", selector, e)))
}

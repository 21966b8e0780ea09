//! Live discovery of quick reply buttons rendered by other components.

mod discovery;
mod scanner;

pub use discovery::{ButtonDiscovery, DiscoveryHandle};
pub use scanner::ButtonScanner;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use qra_core::dom::MutationSource;
use qra_core::error::Result;

/// Where to look for buttons and how to name what is found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObserverConfig {
    /// Element id of the observed container.
    pub container_id: String,
    pub container_selector: String,
    pub button_selector: String,
    /// Set name given to discovered items.
    pub set_name: String,
    /// Prepended, with a space, to the label to form the item message.
    pub message_prefix: String,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            container_id: "send_form".to_string(),
            container_selector: ".qr--buttons.th-button".to_string(),
            button_selector: ".qr--button.menu_button.interactable".to_string(),
            set_name: "JS Runner Buttons".to_string(),
            message_prefix: "[JS Runner]".to_string(),
        }
    }
}

/// Watches one container for third-party buttons.
pub struct LiveButtonObserver {
    source: Arc<dyn MutationSource>,
    container_id: String,
    scanner: Arc<ButtonScanner>,
}

impl LiveButtonObserver {
    /// Fails only when a configured selector does not parse.
    pub fn new(source: Arc<dyn MutationSource>, config: ObserverConfig) -> Result<Self> {
        let scanner = ButtonScanner::new(&config)?;
        Ok(Self {
            source,
            container_id: config.container_id,
            scanner: Arc::new(scanner),
        })
    }

    /// Starts discovery. The container's current contents are scanned
    /// immediately; later insertions are scanned as they arrive.
    ///
    /// Returns `None` when the container cannot be found; the observer then
    /// stays inactive.
    pub fn subscribe(self) -> Option<ButtonDiscovery> {
        let Some(subtree) = self.source.observe(&self.container_id) else {
            tracing::warn!(
                "Container #{} not found; button discovery is inactive",
                self.container_id
            );
            return None;
        };

        tracing::info!("Observing #{} for quick reply buttons", self.container_id);
        Some(ButtonDiscovery::start(self.scanner, subtree))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use futures::stream::{self, BoxStream};
    use qra_core::dom::{MutationBatch, ObservedSubtree};
    use qra_core::quick_reply::{DiscoveryRegistry, QuickReplyItem};
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    const CONTAINER: &str = r#"<div class="qr--buttons th-button">{}</div>"#;

    fn container(buttons: &[&str]) -> String {
        let inner: String = buttons
            .iter()
            .map(|label| {
                format!(r#"<div class="qr--button menu_button interactable">{label}</div>"#)
            })
            .collect();
        CONTAINER.replace("{}", &inner)
    }

    /// One-shot source backed by a prepared subtree.
    struct FixedSource {
        id: &'static str,
        subtree: Mutex<Option<(String, BoxStream<'static, MutationBatch>)>>,
    }

    impl FixedSource {
        fn new(
            id: &'static str,
            current_html: String,
            insertions: BoxStream<'static, MutationBatch>,
        ) -> Arc<Self> {
            Arc::new(Self {
                id,
                subtree: Mutex::new(Some((current_html, insertions))),
            })
        }
    }

    impl MutationSource for FixedSource {
        fn observe(&self, container_id: &str) -> Option<ObservedSubtree> {
            if container_id != self.id {
                return None;
            }
            let (current_html, insertions) = self.subtree.lock().unwrap().take()?;
            Some(ObservedSubtree {
                current_html,
                insertions,
            })
        }
    }

    fn labels(items: &[QuickReplyItem]) -> Vec<String> {
        items.iter().map(|i| i.label.clone()).collect()
    }

    #[tokio::test]
    async fn test_initial_scan_then_insertions() {
        let insertions = stream::iter(vec![
            MutationBatch::single(container(&["Tool2"])),
            MutationBatch::single("<p>nothing here</p>"),
            MutationBatch::single(container(&["Tool3"])),
        ])
        .boxed();
        let source = FixedSource::new("send_form", container(&["Tool1"]), insertions);

        let observer = LiveButtonObserver::new(source, ObserverConfig::default()).unwrap();
        let items: Vec<QuickReplyItem> = observer.subscribe().unwrap().collect().await;
        assert_eq!(labels(&items), vec!["Tool1", "Tool2", "Tool3"]);
    }

    #[tokio::test]
    async fn test_missing_container_abstains() {
        let source = FixedSource::new("elsewhere", String::new(), stream::empty().boxed());
        let observer = LiveButtonObserver::new(source, ObserverConfig::default()).unwrap();
        assert!(observer.subscribe().is_none());
    }

    #[tokio::test]
    async fn test_drain_dedups_into_registry() {
        let insertions = stream::iter(vec![
            MutationBatch::single(container(&["Tool1"])),
            MutationBatch::single(container(&["Buy "])),
            MutationBatch::single(container(&["buy"])),
        ])
        .boxed();
        let source = FixedSource::new("send_form", container(&["Tool1", "Buy"]), insertions);

        let registry = DiscoveryRegistry::new();
        let observer = LiveButtonObserver::new(source, ObserverConfig::default()).unwrap();
        let admitted = observer.subscribe().unwrap().drain_into(&registry).await;

        assert_eq!(admitted, 3);
        assert_eq!(labels(&registry.snapshot().await), vec!["Tool1", "Buy", "buy"]);
    }

    #[tokio::test]
    async fn test_unsubscribe_ends_stream() {
        let (tx, mut rx) = mpsc::unbounded_channel::<MutationBatch>();
        let insertions = stream::poll_fn(move |cx| rx.poll_recv(cx)).boxed();
        let source = FixedSource::new("send_form", container(&["Tool1"]), insertions);

        let registry = DiscoveryRegistry::new();
        let observer = LiveButtonObserver::new(source, ObserverConfig::default()).unwrap();
        let discovery = observer.subscribe().unwrap();
        let handle = discovery.handle();
        let task = discovery.spawn_drain(registry.clone());

        tx.send(MutationBatch::single(container(&["Tool2"]))).unwrap();
        while registry.len().await < 2 {
            tokio::task::yield_now().await;
        }

        handle.unsubscribe();
        assert!(handle.is_unsubscribed());
        assert_eq!(task.await.unwrap(), 2);

        // The drain dropped the stream, and with it the receiver.
        assert!(tx.send(MutationBatch::single(container(&["Tool3"]))).is_err());
        assert!(!registry.contains("Tool3").await);
    }
}

//! Quick Reply Menu
//!
//! The surface the menu UI talks to. It ties together aggregation, dispatch,
//! discovery and settings so the UI holds a single handle.

use std::sync::Arc;

use tokio::task::JoinHandle;

use qra_core::catalog::CatalogProvider;
use qra_core::config::Configuration;
use qra_core::dispatch::QuickReplyDispatcher;
use qra_core::quick_reply::{DiscoveryRegistry, QuickReplyItem};

use crate::aggregation::{AggregatedReplies, AggregationEngine};
use crate::observer::{DiscoveryHandle, LiveButtonObserver};
use crate::settings_store::{SaveReport, SettingsStore};
use crate::trigger::{QuickReplyTrigger, TriggerOutcome};

/// A running discovery task.
pub struct DiscoveryTask {
    pub handle: DiscoveryHandle,
    /// Resolves to the number of items admitted once discovery ends.
    pub join: JoinHandle<usize>,
}

/// Facade over the quick reply core.
pub struct QuickReplyMenu {
    engine: AggregationEngine,
    trigger: QuickReplyTrigger,
    settings: SettingsStore,
}

impl QuickReplyMenu {
    /// Create a new QuickReplyMenu
    ///
    /// # Arguments
    ///
    /// * `provider` - Host catalog, re-read on every fetch and trigger
    /// * `registry` - Discovery registry shared with any running discovery
    /// * `dispatcher` - Host execution API, `None` when the host has none
    /// * `settings` - Settings store backing `load` and `save`
    pub fn new(
        provider: Arc<dyn CatalogProvider>,
        registry: DiscoveryRegistry,
        dispatcher: Option<Arc<dyn QuickReplyDispatcher>>,
        settings: SettingsStore,
    ) -> Self {
        Self {
            engine: AggregationEngine::new(Arc::clone(&provider), registry),
            trigger: QuickReplyTrigger::new(provider, dispatcher),
            settings,
        }
    }

    /// Current chat and global lists.
    pub async fn fetch(&self) -> AggregatedReplies {
        self.engine.fetch().await
    }

    pub async fn trigger_standard(&self, set_name: &str, label: &str) -> TriggerOutcome {
        self.trigger.trigger_standard(set_name, label).await
    }

    pub async fn select(&self, item: &QuickReplyItem) -> TriggerOutcome {
        self.trigger.select(item).await
    }

    pub async fn load(&self) -> Configuration {
        self.settings.load().await
    }

    pub async fn save(&self) -> SaveReport {
        self.settings.save().await
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn discovery_registry(&self) -> &DiscoveryRegistry {
        self.engine.registry()
    }

    /// Forgets every discovered button. Running discovery keeps going and
    /// may register the same labels again.
    pub async fn reset_discovery(&self) {
        self.engine.registry().reset().await;
    }

    /// Subscribes `observer` and drains it into this menu's registry on a
    /// background task.
    ///
    /// # Returns
    ///
    /// * `Some(DiscoveryTask)` - Discovery is running
    /// * `None` - The observed container was not found
    pub fn start_discovery(&self, observer: LiveButtonObserver) -> Option<DiscoveryTask> {
        let discovery = observer.subscribe()?;
        let handle = discovery.handle();
        let join = discovery.spawn_drain(self.engine.registry().clone());
        Some(DiscoveryTask { handle, join })
    }
}

//! Application layer for QRA.
//!
//! Services that read the host catalog, discover third-party buttons, merge
//! both into menu lists, run selections and persist the extension settings.

pub mod aggregation;
pub mod catalog_reader;
pub mod menu;
pub mod observer;
pub mod settings_store;
pub mod trigger;

pub use aggregation::{AggregatedReplies, AggregationEngine, merge};
pub use catalog_reader::{CatalogSnapshot, HostReplyCatalogReader};
pub use menu::{DiscoveryTask, QuickReplyMenu};
pub use observer::{ButtonDiscovery, DiscoveryHandle, LiveButtonObserver, ObserverConfig};
pub use settings_store::{BackendOutcome, SaveReport, SettingsStore};
pub use trigger::{QuickReplyTrigger, TriggerOutcome};

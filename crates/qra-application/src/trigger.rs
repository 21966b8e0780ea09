//! Executing menu selections.

use std::sync::Arc;

use serde::Serialize;

use qra_core::catalog::CatalogProvider;
use qra_core::dispatch::{DispatchRequest, QuickReplyDispatcher, SelectionAction};
use qra_core::quick_reply::QuickReplyItem;

use crate::catalog_reader::HostReplyCatalogReader;

/// Result of asking the host to run a catalog reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome", content = "reason")]
pub enum TriggerOutcome {
    Executed,
    Failed(String),
    /// No dispatcher is wired in.
    DispatcherUnavailable,
    /// The host catalog is absent or switched off.
    CatalogDisabled,
    /// The selection was a discovered button; nothing was dispatched.
    NotDispatched,
}

impl TriggerOutcome {
    pub fn is_executed(&self) -> bool {
        matches!(self, Self::Executed)
    }
}

/// Hands standard replies to the host dispatcher.
#[derive(Clone)]
pub struct QuickReplyTrigger {
    dispatcher: Option<Arc<dyn QuickReplyDispatcher>>,
    reader: HostReplyCatalogReader,
}

impl QuickReplyTrigger {
    pub fn new(
        provider: Arc<dyn CatalogProvider>,
        dispatcher: Option<Arc<dyn QuickReplyDispatcher>>,
    ) -> Self {
        Self {
            dispatcher,
            reader: HostReplyCatalogReader::new(provider),
        }
    }

    /// Runs the catalog reply `set_name`/`label`. Never fails; the outcome
    /// says what happened.
    pub async fn trigger_standard(&self, set_name: &str, label: &str) -> TriggerOutcome {
        let Some(dispatcher) = &self.dispatcher else {
            tracing::error!("Quick reply dispatcher not available; cannot trigger '{}'", label);
            return TriggerOutcome::DispatcherUnavailable;
        };

        if !self.reader.is_enabled().await {
            tracing::warn!("Quick replies are disabled; not triggering '{}'", label);
            return TriggerOutcome::CatalogDisabled;
        }

        match dispatcher.execute(set_name, label).await {
            Ok(()) => {
                tracing::info!("Triggered quick reply '{}' from set '{}'", label, set_name);
                TriggerOutcome::Executed
            }
            Err(e) => {
                tracing::error!(
                    "Failed to trigger quick reply '{}' from set '{}': {}",
                    label,
                    set_name,
                    e
                );
                TriggerOutcome::Failed(e.to_string())
            }
        }
    }

    /// Handles a menu selection: standard items are triggered, discovered
    /// ones are left to the UI.
    pub async fn select(&self, item: &QuickReplyItem) -> TriggerOutcome {
        match SelectionAction::for_item(item) {
            SelectionAction::Dispatch(DispatchRequest { set_name, label }) => {
                self.trigger_standard(&set_name, &label).await
            }
            SelectionAction::LocalOnly => {
                tracing::debug!("Selected discovered item '{}'", item.label);
                TriggerOutcome::NotDispatched
            }
        }
    }
}

//! Boundary to the host's quick reply execution API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::quick_reply::QuickReplyItem;

/// Executes catalog quick replies on the host.
#[async_trait]
pub trait QuickReplyDispatcher: Send + Sync {
    /// Runs the reply identified by `set_name` and `label`.
    async fn execute(&self, set_name: &str, label: &str) -> Result<()>;
}

/// The call shape handed to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRequest {
    pub set_name: String,
    pub label: String,
}

/// What selecting a menu item means for the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionAction {
    /// A catalog item, executed through the dispatcher.
    Dispatch(DispatchRequest),
    /// A discovered button; handled by the UI, no dispatcher call.
    LocalOnly,
}

impl SelectionAction {
    pub fn for_item(item: &QuickReplyItem) -> Self {
        if item.is_standard {
            Self::Dispatch(DispatchRequest {
                set_name: item.set_name.clone(),
                label: item.label.clone(),
            })
        } else {
            Self::LocalOnly
        }
    }
}

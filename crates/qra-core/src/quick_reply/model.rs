//! Quick reply domain models.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Set name assigned to catalog sets that carry no name.
pub const UNKNOWN_SET_NAME: &str = "Unknown Set";

/// Message assigned to catalog entries without message text.
pub const EMPTY_MESSAGE_PLACEHOLDER: &str = "(no message content)";

/// Whether an item belongs to the current chat or applies globally.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReplyScope {
    Chat,
    Global,
}

/// A labeled, user-triggerable action shown in the quick reply menu.
///
/// `label` is the identity key: within the chat scope of an aggregated result
/// no two items share a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickReplyItem {
    /// Name of the set the item came from.
    pub set_name: String,
    /// Visible label, also the deduplication key.
    pub label: String,
    /// Message text sent when the reply is triggered.
    pub message: String,
    /// True for host catalog entries, which can be executed by the dispatcher.
    pub is_standard: bool,
    pub scope: ReplyScope,
}

impl QuickReplyItem {
    /// Creates a catalog-backed item.
    pub fn standard(
        set_name: impl Into<String>,
        label: impl Into<String>,
        message: impl Into<String>,
        scope: ReplyScope,
    ) -> Self {
        Self {
            set_name: set_name.into(),
            label: label.into(),
            message: message.into(),
            is_standard: true,
            scope,
        }
    }

    /// Creates an item discovered from a third-party button.
    ///
    /// Discovered items always live in the chat scope.
    pub fn discovered(
        set_name: impl Into<String>,
        label: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            set_name: set_name.into(),
            label: label.into(),
            message: message.into(),
            is_standard: false,
            scope: ReplyScope::Chat,
        }
    }
}

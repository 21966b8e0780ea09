//! Host catalog schema.
//!
//! ## Version History
//! - **1.0.0**: Quick Reply v2 settings layout (`chatConfig` / `config` set lists)
//!
//! Every field is optional: the host hands over a loosely-shaped settings
//! object and the parser decides per element what is usable.

use serde::Deserialize;
use serde_json::Value;

/// Key of the chat-scoped set list container.
pub const CHAT_CONFIG_KEY: &str = "chatConfig";

/// Key of the global set list container.
pub const GLOBAL_CONFIG_KEY: &str = "config";

/// Reference from a set list to a reply set, with its visibility.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLinkV1 {
    #[serde(default)]
    pub is_visible: Option<bool>,
    #[serde(default)]
    pub set: Option<ReplySetV1>,
}

/// A named set of reply entries.
///
/// Entries stay raw JSON so that one malformed entry can be skipped without
/// rejecting the whole set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplySetV1 {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub qr_list: Option<Vec<Value>>,
}

/// A single reply entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyEntryV1 {
    #[serde(default)]
    pub is_hidden: Option<bool>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

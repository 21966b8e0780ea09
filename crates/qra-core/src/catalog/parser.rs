//! Tolerant parser for the host quick reply catalog.

use serde::Serialize;
use serde_json::Value;

use super::schema::{CHAT_CONFIG_KEY, GLOBAL_CONFIG_KEY, ReplyEntryV1, SetLinkV1};
use crate::quick_reply::{EMPTY_MESSAGE_PLACEHOLDER, QuickReplyItem, ReplyScope, UNKNOWN_SET_NAME};

/// Whether the parsed catalog could be used at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status", content = "detail")]
pub enum CatalogStatus {
    Enabled,
    /// The host explicitly turned quick replies off.
    Disabled,
    /// The root value is not an object.
    Malformed(String),
    /// The host exposes no catalog, or it could not be read.
    Unavailable(String),
}

/// Why a catalog element was not admitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "reason", content = "detail")]
pub enum SkipReason {
    /// The element has the wrong shape.
    Malformed(String),
    /// The set link is not marked visible.
    SetHidden,
    /// The set link carries no set or the set has no entry list.
    MissingSet,
    /// The entry is individually hidden.
    EntryHidden,
    /// The entry has no label or an empty one.
    EmptyLabel,
}

/// A catalog element that was skipped, with where it sat and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedEntry {
    pub scope: ReplyScope,
    /// Position of the set link in its set list.
    pub set_index: usize,
    /// Position of the entry in the set, `None` when the whole set was skipped.
    pub entry_index: Option<usize>,
    pub reason: SkipReason,
}

/// Result of parsing a catalog snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogParse {
    pub status: CatalogStatus,
    pub chat: Vec<QuickReplyItem>,
    pub global: Vec<QuickReplyItem>,
    pub skipped: Vec<SkippedEntry>,
}

impl CatalogParse {
    /// An empty result for a catalog that could not be obtained.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::empty(CatalogStatus::Unavailable(reason.into()))
    }

    fn empty(status: CatalogStatus) -> Self {
        Self {
            status,
            chat: Vec::new(),
            global: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.status == CatalogStatus::Enabled
    }
}

/// Returns true unless the catalog explicitly carries `isEnabled: false`.
pub fn catalog_enabled(root: &Value) -> bool {
    root.get("isEnabled").and_then(Value::as_bool) != Some(false)
}

/// Parses a host catalog snapshot.
///
/// Never fails: every set link and entry is judged on its own, and anything
/// unusable is reported in [`CatalogParse::skipped`] while its siblings are
/// still processed.
pub fn parse_catalog(root: &Value) -> CatalogParse {
    if !root.is_object() {
        return CatalogParse::empty(CatalogStatus::Malformed(format!(
            "expected an object, found {}",
            json_kind(root)
        )));
    }

    if !catalog_enabled(root) {
        return CatalogParse::empty(CatalogStatus::Disabled);
    }

    let mut parse = CatalogParse::empty(CatalogStatus::Enabled);
    parse.chat = parse_set_list(root, CHAT_CONFIG_KEY, ReplyScope::Chat, &mut parse.skipped);
    parse.global = parse_set_list(root, GLOBAL_CONFIG_KEY, ReplyScope::Global, &mut parse.skipped);
    parse
}

fn parse_set_list(
    root: &Value,
    config_key: &str,
    scope: ReplyScope,
    skipped: &mut Vec<SkippedEntry>,
) -> Vec<QuickReplyItem> {
    let Some(set_list) = root
        .get(config_key)
        .and_then(|config| config.get("setList"))
        .and_then(Value::as_array)
    else {
        tracing::warn!("Could not find {}.setList in the quick reply catalog", config_key);
        return Vec::new();
    };

    let mut items = Vec::new();
    for (set_index, raw_link) in set_list.iter().enumerate() {
        let mut skip = |entry_index: Option<usize>, reason: SkipReason| {
            tracing::debug!(
                "Skipping {} catalog element (set {}, entry {:?}): {:?}",
                scope,
                set_index,
                entry_index,
                reason
            );
            skipped.push(SkippedEntry {
                scope,
                set_index,
                entry_index,
                reason,
            });
        };

        let link: SetLinkV1 = match serde_json::from_value(raw_link.clone()) {
            Ok(link) => link,
            Err(e) => {
                skip(None, SkipReason::Malformed(e.to_string()));
                continue;
            }
        };

        if link.is_visible != Some(true) {
            skip(None, SkipReason::SetHidden);
            continue;
        }

        let Some(set) = link.set else {
            skip(None, SkipReason::MissingSet);
            continue;
        };
        let Some(entries) = set.qr_list else {
            skip(None, SkipReason::MissingSet);
            continue;
        };

        let set_name = set
            .name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_SET_NAME.to_string());

        for (entry_index, raw_entry) in entries.iter().enumerate() {
            if raw_entry.is_null() {
                skip(Some(entry_index), SkipReason::Malformed("null entry".to_string()));
                continue;
            }

            let entry: ReplyEntryV1 = match serde_json::from_value(raw_entry.clone()) {
                Ok(entry) => entry,
                Err(e) => {
                    skip(Some(entry_index), SkipReason::Malformed(e.to_string()));
                    continue;
                }
            };

            if entry.is_hidden == Some(true) {
                skip(Some(entry_index), SkipReason::EntryHidden);
                continue;
            }

            let Some(label) = entry.label.filter(|label| !label.is_empty()) else {
                skip(Some(entry_index), SkipReason::EmptyLabel);
                continue;
            };

            let message = entry
                .message
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| EMPTY_MESSAGE_PLACEHOLDER.to_string());

            items.push(QuickReplyItem::standard(set_name.clone(), label, message, scope));
        }
    }

    items
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

//! Settings persistence traits.

use async_trait::async_trait;
use serde_json::Value;

use super::model::Configuration;
use crate::error::Result;

/// Local key/value fallback store for the settings record.
#[async_trait]
pub trait LocalSettingsStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// Host-managed extension settings.
#[async_trait]
pub trait HostSettingsHook: Send + Sync {
    /// Returns the record the host holds for `extension`, if any.
    async fn load_extension_settings(&self, extension: &str) -> Result<Option<Value>>;

    /// Persists `settings` as the record for `extension`.
    async fn save_extension_settings(&self, extension: &str, settings: &Configuration)
    -> Result<()>;
}

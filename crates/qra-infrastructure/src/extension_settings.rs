//! Host-managed extension settings backed by a TOML file.
//!
//! File location: `{config_dir}/qra/extension_settings.toml`, one table per
//! extension.

use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

use qra_core::QraError;
use qra_core::config::{Configuration, HostSettingsHook};
use qra_core::error::Result;

use crate::storage::TomlTableFile;

/// Extension settings store shared by every extension of the host.
#[derive(Clone)]
pub struct TomlExtensionSettings {
    file: Arc<TomlTableFile>,
}

impl TomlExtensionSettings {
    /// Creates the store backed by the TOML file at `path`.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(TomlTableFile::new(path)),
        }
    }
}

#[async_trait]
impl HostSettingsHook for TomlExtensionSettings {
    async fn load_extension_settings(&self, extension: &str) -> Result<Option<Value>> {
        let file = self.file.clone();
        let extension = extension.to_string();
        tokio::task::spawn_blocking(move || file.read_table(&extension))
            .await
            .map_err(|e| QraError::internal(format!("Failed to join task: {}", e)))?
    }

    async fn save_extension_settings(
        &self,
        extension: &str,
        settings: &Configuration,
    ) -> Result<()> {
        let table = serde_json::to_value(settings)?;
        let file = self.file.clone();
        let extension = extension.to_string();

        tokio::task::spawn_blocking(move || file.write_table(&extension, &table))
            .await
            .map_err(|e| QraError::internal(format!("Failed to join task: {}", e)))??;

        tracing::debug!("Extension settings written to {:?}", self.file.path());
        Ok(())
    }
}

//! Local key/value fallback stores.
//!
//! File location: `{base_dir}/{key}.json`

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::Mutex;

use qra_core::QraError;
use qra_core::config::LocalSettingsStore;
use qra_core::error::Result;

use super::toml_table::temp_path_for;

/// File-backed key/value store, one file per key.
pub struct FileLocalStorage {
    base_dir: PathBuf,
}

impl FileLocalStorage {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Returns the file holding `key`.
    ///
    /// Keys are restricted to ASCII letters, digits, `-`, `_` and `.` so they
    /// cannot escape the base directory.
    fn item_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(QraError::config(format!("Invalid storage key: '{}'", key)));
        }
        Ok(self.base_dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl LocalSettingsStore for FileLocalStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| QraError::io(format!("Failed to read {:?}: {}", path, e)))?;
        Ok(Some(content))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.item_path(key)?;

        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| QraError::io(format!("Failed to create directory: {}", e)))?;

        let tmp_path = temp_path_for(&path)?;
        fs::write(&tmp_path, value)
            .await
            .map_err(|e| QraError::io(format!("Failed to write {:?}: {}", tmp_path, e)))?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| QraError::io(format!("Failed to replace {:?}: {}", path, e)))?;

        Ok(())
    }
}

/// In-memory key/value store with an optional byte quota.
///
/// Writes that would push the total size of keys and values past the quota
/// fail with a storage error and leave the store unchanged, like a browser's
/// local storage.
#[derive(Default)]
pub struct MemoryLocalStorage {
    items: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryLocalStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }
}

#[async_trait]
impl LocalSettingsStore for MemoryLocalStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.lock().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.lock().await;

        if let Some(quota) = self.quota_bytes {
            let others: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(QraError::storage(format!(
                    "Quota exceeded: {} bytes needed, {} allowed",
                    needed, quota
                )));
            }
        }

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

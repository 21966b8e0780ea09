//! TOML file of per-extension tables, written atomically under a file lock.
//!
//! Data crosses this layer as `serde_json::Value` so callers never see TOML
//! specifics.

use serde_json::{Map, Value as JsonValue};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use qra_core::QraError;
use qra_core::error::Result;

/// A TOML document whose top-level tables are addressed by name.
///
/// Responsibilities:
/// - **File locking** (exclusive lock around read-modify-write)
/// - **Atomic writes** (tmp file + fsync + rename)
/// - **Format conversion** (TOML ⇄ serde_json::Value)
pub struct TomlTableFile {
    path: PathBuf,
}

impl TomlTableFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the whole document.
    ///
    /// A missing or blank file yields `Ok(None)`.
    pub fn load(&self) -> Result<Option<JsonValue>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let toml_value: toml::Value = toml::from_str(&content)?;
        Ok(Some(toml_to_json(toml_value)?))
    }

    /// Returns the table stored under `name`.
    pub fn read_table(&self, name: &str) -> Result<Option<JsonValue>> {
        Ok(self.load()?.and_then(|doc| doc.get(name).cloned()))
    }

    /// Replaces the table stored under `name`, keeping every other table.
    pub fn write_table(&self, name: &str, table: &JsonValue) -> Result<()> {
        if !table.is_object() {
            return Err(QraError::Serialization {
                format: "TOML".to_string(),
                message: format!("table '{}' must be an object", name),
            });
        }

        let _lock = FileLock::acquire(&self.path)?;

        let mut doc = match self.load()? {
            Some(JsonValue::Object(map)) => map,
            Some(_) => {
                tracing::warn!(
                    "Replacing non-table document at {:?} while writing '{}'",
                    self.path,
                    name
                );
                Map::new()
            }
            None => Map::new(),
        };
        doc.insert(name.to_string(), table.clone());

        self.save(&JsonValue::Object(doc))
    }

    fn save(&self, data: &JsonValue) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_value = json_to_toml(data)?;
        let toml_string = toml::to_string_pretty(&toml_value)?;

        let tmp_path = temp_path_for(&self.path)?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

/// Sibling path used for atomic writes: `.{file_name}.tmp`.
pub(crate) fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let parent = path
        .parent()
        .ok_or_else(|| QraError::io(format!("{:?} has no parent directory", path)))?;
    let file_name = path
        .file_name()
        .ok_or_else(|| QraError::io(format!("{:?} has no file name", path)))?;

    Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
}

/// Exclusive lock held for the lifetime of the guard.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| QraError::storage(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlocks when the handle closes; removing the file is best effort.
        let _ = fs::remove_file(&self.lock_path);
    }
}

fn toml_to_json(toml_value: toml::Value) -> Result<JsonValue> {
    let json_str = serde_json::to_string(&toml_value)?;
    Ok(serde_json::from_str(&json_str)?)
}

fn json_to_toml(json_value: &JsonValue) -> Result<toml::Value> {
    let json_str = serde_json::to_string(json_value)?;
    Ok(serde_json::from_str(&json_str)?)
}

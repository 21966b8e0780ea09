//! Path management for QRA storage.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/qra/                   # Config directory
//! ├── extension_settings.toml      # Host-managed extension settings
//! └── local_storage/               # Local fallback store, one file per key
//!     └── QRA_settings.json
//! ```

use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "qra";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Path resolution for QRA.
pub struct QraPaths;

impl QraPaths {
    /// Returns the QRA configuration directory (e.g. `~/.config/qra/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Extension settings file below an explicit base directory.
    pub fn extension_settings_file_in(base: &Path) -> PathBuf {
        base.join("extension_settings.toml")
    }

    /// Local fallback store directory below an explicit base directory.
    pub fn local_storage_dir_in(base: &Path) -> PathBuf {
        base.join("local_storage")
    }
}

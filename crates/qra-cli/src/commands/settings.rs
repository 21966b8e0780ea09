use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Result, bail};
use clap::Args;

use qra_application::SettingsStore;
use qra_core::config::TextControl;
use qra_infrastructure::paths::QraPaths;
use qra_infrastructure::{FileLocalStorage, TomlExtensionSettings};

use super::print_json;

#[derive(Args, Default)]
pub struct SaveArgs {
    #[arg(long)]
    enabled: Option<bool>,

    /// rocket, custom or fa-code
    #[arg(long)]
    icon_type: Option<String>,

    /// Image URL for the custom icon
    #[arg(long)]
    custom_icon_url: Option<String>,

    /// Read the custom icon URL from a file (e.g. a large data URL)
    #[arg(long, conflicts_with = "custom_icon_url")]
    custom_icon_url_file: Option<PathBuf>,

    #[arg(long)]
    custom_icon_size: Option<String>,

    #[arg(long)]
    fa_icon_code: Option<String>,

    #[arg(long)]
    match_button_colors: Option<bool>,
}

/// Resolves the storage base directory, preferring an explicit one.
pub fn base_dir(data_dir: Option<PathBuf>) -> Result<PathBuf> {
    match data_dir {
        Some(dir) => Ok(dir),
        None => Ok(QraPaths::config_dir()?),
    }
}

async fn open_store(base: &Path) -> SettingsStore {
    let local = Arc::new(FileLocalStorage::new(QraPaths::local_storage_dir_in(base)));
    let host = Arc::new(TomlExtensionSettings::with_path(
        QraPaths::extension_settings_file_in(base),
    ));
    let store = SettingsStore::initialize(local, Some(host)).await;
    store.load().await;
    store
}

pub async fn show(base: &Path) -> Result<()> {
    let store = open_store(base).await;
    print_json(&store.current().await)
}

pub async fn save(base: &Path, args: SaveArgs) -> Result<()> {
    let custom_icon_url = match args.custom_icon_url_file {
        Some(path) => Some(std::fs::read_to_string(path)?.trim().to_string()),
        None => args.custom_icon_url,
    };

    let store = open_store(base).await;
    store
        .edit_form(|form| {
            if let Some(enabled) = args.enabled {
                form.enabled = Some(enabled);
            }
            if let Some(icon_type) = args.icon_type {
                form.icon_type = Some(icon_type);
            }
            if let Some(url) = custom_icon_url {
                form.custom_icon_url = Some(TextControl::new(url));
            }
            if let Some(size) = args.custom_icon_size {
                form.custom_icon_size = Some(size);
            }
            if let Some(code) = args.fa_icon_code {
                form.fa_icon_code = Some(TextControl::new(code));
            }
            if let Some(matched) = args.match_button_colors {
                form.match_button_colors = Some(matched);
            }
        })
        .await;

    let report = store.save().await;
    print_json(&report)?;
    if !report.succeeded() {
        bail!("Settings could not be saved to any backend");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qra_core::config::IconType;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_then_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let args = SaveArgs {
            icon_type: Some("fa-code".to_string()),
            fa_icon_code: Some("<i class=\"fa-solid fa-bolt\"></i>".to_string()),
            custom_icon_size: Some("0".to_string()),
            ..SaveArgs::default()
        };
        save(temp_dir.path(), args).await.unwrap();

        let config = open_store(temp_dir.path()).await.current().await;
        assert_eq!(config.icon_type, IconType::FaCode);
        assert_eq!(config.fa_icon_code, "<i class=\"fa-solid fa-bolt\"></i>");
        assert_eq!(config.custom_icon_size, 20);
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let dir = PathBuf::from("/tmp/qra-explicit");
        assert_eq!(base_dir(Some(dir.clone())).unwrap(), dir);
    }
}

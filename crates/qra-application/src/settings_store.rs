//! Extension settings: the live configuration, its panel and its two backends.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};

use qra_core::config::{
    Configuration, EXTENSION_NAME, HostSettingsHook, LOCAL_SETTINGS_KEY, LocalSettingsStore,
    SettingsForm, shallow_merge,
};
use qra_core::error::Result;

/// What happened to one persistence backend during a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome", content = "reason")]
pub enum BackendOutcome {
    Saved,
    Failed(String),
    /// The backend is not wired in.
    Unavailable,
}

impl BackendOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Per-backend result of [`SettingsStore::save`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReport {
    pub local: BackendOutcome,
    pub host: BackendOutcome,
    pub saved_at: DateTime<Utc>,
}

impl SaveReport {
    /// True when at least one backend kept the settings.
    pub fn succeeded(&self) -> bool {
        self.local.is_saved() || self.host.is_saved()
    }
}

/// Owns the extension configuration.
///
/// `load` overlays the locally stored record and refreshes the panel; `save`
/// reads the panel back and writes to the local store and the host hook
/// independently. Neither ever returns an error.
pub struct SettingsStore {
    config: Arc<RwLock<Configuration>>,
    form: Mutex<SettingsForm>,
    local: Arc<dyn LocalSettingsStore>,
    host_hook: Option<Arc<dyn HostSettingsHook>>,
}

impl SettingsStore {
    /// A store holding the default configuration, shown in a fully rendered
    /// panel.
    pub fn new(
        local: Arc<dyn LocalSettingsStore>,
        host_hook: Option<Arc<dyn HostSettingsHook>>,
    ) -> Self {
        let config = Configuration::default();
        let mut form = SettingsForm::rendered();
        form.populate(&config);

        Self {
            config: Arc::new(RwLock::new(config)),
            form: Mutex::new(form),
            local,
            host_hook,
        }
    }

    /// Creates a store seeded from the record the host keeps for this
    /// extension, when there is one.
    pub async fn initialize(
        local: Arc<dyn LocalSettingsStore>,
        host_hook: Option<Arc<dyn HostSettingsHook>>,
    ) -> Self {
        let store = Self::new(local, host_hook);
        store.seed_from_host().await;

        let config = store.current().await;
        store.form.lock().await.populate(&config);
        store
    }

    /// Replaces the panel, e.g. with one where some controls are not rendered.
    pub fn with_form(mut self, form: SettingsForm) -> Self {
        self.form = Mutex::new(form);
        self
    }

    /// Returns a copy of the live configuration.
    pub async fn current(&self) -> Configuration {
        self.config.read().await.clone()
    }

    /// Returns a copy of the panel controls.
    pub async fn form(&self) -> SettingsForm {
        self.form.lock().await.clone()
    }

    /// Changes panel controls the way user input would.
    pub async fn edit_form<R>(&self, edit: impl FnOnce(&mut SettingsForm) -> R) -> R {
        let mut form = self.form.lock().await;
        edit(&mut form)
    }

    /// Overlays the locally stored record on the live configuration and shows
    /// the result in the panel.
    pub async fn load(&self) -> Configuration {
        match self.read_local().await {
            Ok(Some(stored)) => self.merge_stored(&stored, "local storage").await,
            Ok(None) => tracing::debug!("No locally stored settings under {}", LOCAL_SETTINGS_KEY),
            Err(e) => tracing::error!("Failed to load settings from local storage: {}", e),
        }

        let config = self.current().await;
        self.form.lock().await.populate(&config);
        config
    }

    /// Reads the panel into the configuration and persists it.
    pub async fn save(&self) -> SaveReport {
        let config = {
            let form = self.form.lock().await;
            let mut config = self.config.write().await;
            form.apply_to(&mut config);
            config.clone()
        };

        let local = match self.write_local(&config).await {
            Ok(()) => {
                tracing::debug!("Settings saved to local storage");
                BackendOutcome::Saved
            }
            Err(e) => {
                tracing::error!("Failed to save settings to local storage: {}", e);
                BackendOutcome::Failed(e.to_string())
            }
        };

        let host = match &self.host_hook {
            Some(hook) => match hook.save_extension_settings(EXTENSION_NAME, &config).await {
                Ok(()) => {
                    tracing::debug!("Settings saved through the host hook");
                    BackendOutcome::Saved
                }
                Err(e) => {
                    tracing::error!("Failed to save settings through the host hook: {}", e);
                    BackendOutcome::Failed(e.to_string())
                }
            },
            None => {
                tracing::debug!("No host settings hook; skipping host save");
                BackendOutcome::Unavailable
            }
        };

        let report = SaveReport {
            local,
            host,
            saved_at: Utc::now(),
        };
        if report.succeeded() {
            tracing::info!("Settings saved");
        } else {
            tracing::error!("Settings could not be saved to any backend");
        }
        report
    }

    async fn seed_from_host(&self) {
        let Some(hook) = &self.host_hook else {
            return;
        };

        match hook.load_extension_settings(EXTENSION_NAME).await {
            Ok(Some(stored)) => self.merge_stored(&stored, "host settings").await,
            Ok(None) => tracing::debug!("Host holds no settings for {}", EXTENSION_NAME),
            Err(e) => tracing::error!("Failed to read host settings: {}", e),
        }
    }

    async fn merge_stored(&self, stored: &Value, origin: &str) {
        let mut config = self.config.write().await;
        match shallow_merge(&config, stored) {
            Ok(outcome) => {
                tracing::debug!(
                    "Merged settings from {} (applied: {:?}, rejected: {}, ignored: {:?})",
                    origin,
                    outcome.applied,
                    outcome.rejected.len(),
                    outcome.ignored
                );
                *config = outcome.config;
            }
            Err(e) => tracing::error!("Discarding settings from {}: {}", origin, e),
        }
    }

    async fn read_local(&self) -> Result<Option<Value>> {
        let Some(raw) = self.local.get_item(LOCAL_SETTINGS_KEY).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    async fn write_local(&self, config: &Configuration) -> Result<()> {
        let raw = serde_json::to_string(config)?;
        self.local.set_item(LOCAL_SETTINGS_KEY, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use qra_core::QraError;
    use qra_core::config::{
        DEFAULT_CUSTOM_ICON_SIZE, IconType, MenuStyles, OVERSIZED_FIELD_PLACEHOLDER, TextControl,
    };
    use qra_infrastructure::MemoryLocalStorage;
    use serde_json::json;

    /// Host hook that keeps records in memory and can be told to fail.
    #[derive(Default)]
    struct MockHostHook {
        record: Mutex<Option<Value>>,
        fail_save: bool,
    }

    #[async_trait]
    impl HostSettingsHook for MockHostHook {
        async fn load_extension_settings(&self, _extension: &str) -> Result<Option<Value>> {
            Ok(self.record.lock().await.clone())
        }

        async fn save_extension_settings(
            &self,
            _extension: &str,
            settings: &Configuration,
        ) -> Result<()> {
            if self.fail_save {
                return Err(QraError::storage("host refused"));
            }
            *self.record.lock().await = Some(serde_json::to_value(settings)?);
            Ok(())
        }
    }

    fn failing_hook() -> Arc<MockHostHook> {
        Arc::new(MockHostHook {
            fail_save: true,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_save_succeeds_when_only_local_works() {
        let store = SettingsStore::new(Arc::new(MemoryLocalStorage::new()), Some(failing_hook()));
        let report = store.save().await;

        assert_eq!(report.local, BackendOutcome::Saved);
        assert!(matches!(report.host, BackendOutcome::Failed(_)));
        assert!(report.succeeded());
    }

    #[tokio::test]
    async fn test_save_succeeds_when_only_host_works() {
        let hook = Arc::new(MockHostHook::default());
        let store = SettingsStore::new(Arc::new(MemoryLocalStorage::with_quota(4)), Some(hook.clone()));
        let report = store.save().await;

        assert!(matches!(report.local, BackendOutcome::Failed(_)));
        assert_eq!(report.host, BackendOutcome::Saved);
        assert!(report.succeeded());
        assert!(hook.record.lock().await.is_some());
    }

    #[tokio::test]
    async fn test_save_fails_only_when_both_fail() {
        let store = SettingsStore::new(
            Arc::new(MemoryLocalStorage::with_quota(4)),
            Some(failing_hook()),
        );
        assert!(!store.save().await.succeeded());

        let store = SettingsStore::new(Arc::new(MemoryLocalStorage::with_quota(4)), None);
        let report = store.save().await;
        assert_eq!(report.host, BackendOutcome::Unavailable);
        assert!(!report.succeeded());
    }

    #[tokio::test]
    async fn test_save_before_load_keeps_defaults() {
        let local = Arc::new(MemoryLocalStorage::new());
        let store = SettingsStore::new(local.clone(), None);
        assert!(store.save().await.succeeded());
        assert_eq!(store.current().await, Configuration::default());

        let stored = local.get_item(LOCAL_SETTINGS_KEY).await.unwrap().unwrap();
        let stored: Configuration = serde_json::from_str(&stored).unwrap();
        assert_eq!(stored, Configuration::default());
    }

    #[tokio::test]
    async fn test_save_after_initialize_keeps_host_values() {
        let hook = Arc::new(MockHostHook {
            record: Mutex::new(Some(json!({
                "iconType": "fa-code",
                "customIconSize": 32,
                "matchButtonColors": false
            }))),
            fail_save: false,
        });

        let store =
            SettingsStore::initialize(Arc::new(MemoryLocalStorage::new()), Some(hook.clone())).await;
        let seeded = store.current().await;
        assert_eq!(seeded.icon_type, IconType::FaCode);

        assert!(store.save().await.succeeded());
        let saved = store.current().await;
        assert_eq!(saved, seeded);
        assert!(saved.enabled);
        assert!(!saved.match_button_colors);
        assert_eq!(saved.custom_icon_size, 32);

        let record = hook.record.lock().await.clone().unwrap();
        assert_eq!(record["iconType"], "fa-code");
        assert_eq!(record["enabled"], true);
    }

    #[tokio::test]
    async fn test_oversized_value_round_trips() {
        let local = Arc::new(MemoryLocalStorage::new());
        let data_url = format!("data:image/png;base64,{}", "A".repeat(5000));

        let store = SettingsStore::new(local.clone(), None);
        store
            .edit_form(|form| {
                form.icon_type = Some("custom".to_string());
                form.custom_icon_url = Some(TextControl::new(data_url.clone()));
            })
            .await;
        assert!(store.save().await.succeeded());

        let reloaded = SettingsStore::new(local, None);
        let config = reloaded.load().await;
        assert_eq!(config.custom_icon_url, data_url);
        assert_eq!(config.icon_type, IconType::Custom);

        let form = reloaded.form().await;
        let control = form.custom_icon_url.unwrap();
        assert_eq!(control.visible_value(), OVERSIZED_FIELD_PLACEHOLDER);
        assert_eq!(control.effective_value(), data_url);

        // Saving again without touching the control keeps the full value.
        assert!(reloaded.save().await.succeeded());
        assert_eq!(reloaded.current().await.custom_icon_url, data_url);
    }

    #[tokio::test]
    async fn test_load_replaces_menu_styles_wholesale() {
        let local = Arc::new(MemoryLocalStorage::new());
        local
            .set_item(
                LOCAL_SETTINGS_KEY,
                &json!({ "menuStyles": { "itemBgColor": "red" }, "enabled": false }).to_string(),
            )
            .await
            .unwrap();

        let store = SettingsStore::new(local, None);
        let config = store.load().await;
        assert!(!config.enabled);
        assert_eq!(config.menu_styles.item_bg_color.as_deref(), Some("red"));
        assert!(config.menu_styles.item_text_color.is_none());
        assert!(config.menu_styles.menu_border_color.is_none());
        assert_ne!(config.menu_styles, MenuStyles::default());
        assert_eq!(store.form().await.enabled, Some(false));
    }

    #[tokio::test]
    async fn test_load_survives_garbage() {
        let local = Arc::new(MemoryLocalStorage::new());
        local.set_item(LOCAL_SETTINGS_KEY, "{not json").await.unwrap();

        let store = SettingsStore::new(local, None);
        assert_eq!(store.load().await, Configuration::default());
    }

    #[tokio::test]
    async fn test_unrendered_controls_are_left_alone() {
        let local = Arc::new(MemoryLocalStorage::new());
        let store = SettingsStore::new(local, None).with_form(SettingsForm {
            enabled: Some(false),
            ..SettingsForm::default()
        });

        store.save().await;
        let config = store.current().await;
        assert!(!config.enabled);
        assert_eq!(config.custom_icon_size, DEFAULT_CUSTOM_ICON_SIZE);
        assert_eq!(config.icon_type, IconType::Rocket);
    }

    #[tokio::test]
    async fn test_initialize_seeds_from_host() {
        let hook = Arc::new(MockHostHook {
            record: Mutex::new(Some(json!({ "iconType": "fa-code", "customIconSize": 32 }))),
            fail_save: false,
        });

        let store = SettingsStore::initialize(Arc::new(MemoryLocalStorage::new()), Some(hook)).await;
        let config = store.current().await;
        assert_eq!(config.icon_type, IconType::FaCode);
        assert_eq!(config.custom_icon_size, 32);
    }
}

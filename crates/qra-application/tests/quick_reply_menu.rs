//! End-to-end tests for the quick reply menu using the file and channel adapters.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tempfile::TempDir;
use tokio::sync::Mutex;

use qra_application::{
    BackendOutcome, LiveButtonObserver, ObserverConfig, QuickReplyMenu, SettingsStore,
    TriggerOutcome,
};
use qra_core::config::{IconType, OVERSIZED_FIELD_PLACEHOLDER, TextControl};
use qra_core::dispatch::QuickReplyDispatcher;
use qra_core::error::Result;
use qra_core::quick_reply::DiscoveryRegistry;
use qra_infrastructure::paths::QraPaths;
use qra_infrastructure::{
    ChannelMutationSource, FileLocalStorage, InMemoryCatalogProvider, JsonFileCatalogProvider,
    TomlExtensionSettings,
};

#[derive(Default)]
struct RecordingDispatcher {
    calls: Mutex<Vec<String>>,
}

#[async_trait]
impl QuickReplyDispatcher for RecordingDispatcher {
    async fn execute(&self, set_name: &str, label: &str) -> Result<()> {
        self.calls.lock().await.push(format!("{set_name}/{label}"));
        Ok(())
    }
}

fn catalog() -> serde_json::Value {
    json!({
        "isEnabled": true,
        "chatConfig": { "setList": [
            { "isVisible": true, "set": { "name": "A", "qrList": [
                { "label": "Hi", "message": "Hello" },
                { "label": "Tool2", "message": "Catalog copy" }
            ]}}
        ]},
        "config": { "setList": [
            { "isVisible": true, "set": { "name": "B", "qrList": [
                { "label": "Hi", "message": "Hello again" },
                { "label": "Bye", "message": "Goodbye" }
            ]}},
            { "isVisible": false, "set": { "name": "C", "qrList": [
                { "label": "Secret" }
            ]}}
        ]}
    })
}

fn buttons(labels: &[&str]) -> String {
    let inner: String = labels
        .iter()
        .map(|label| format!(r#"<div class="qr--button menu_button interactable">{label}</div>"#))
        .collect();
    format!(r#"<div class="qr--buttons th-button">{inner}</div>"#)
}

fn settings_in(dir: &TempDir) -> SettingsStore {
    SettingsStore::new(
        Arc::new(FileLocalStorage::new(QraPaths::local_storage_dir_in(dir.path()))),
        Some(Arc::new(TomlExtensionSettings::with_path(
            QraPaths::extension_settings_file_in(dir.path()),
        ))),
    )
}

#[tokio::test]
async fn test_fetch_merges_catalog_and_discovery() {
    let temp_dir = TempDir::new().unwrap();
    let catalog_path = temp_dir.path().join("catalog.json");
    std::fs::write(&catalog_path, catalog().to_string()).unwrap();

    let dispatcher = Arc::new(RecordingDispatcher::default());
    let menu = QuickReplyMenu::new(
        Arc::new(JsonFileCatalogProvider::new(catalog_path)),
        DiscoveryRegistry::new(),
        Some(dispatcher.clone()),
        settings_in(&temp_dir),
    );

    let (source, feed) = ChannelMutationSource::new("send_form", buttons(&["Tool1"]));
    let observer = LiveButtonObserver::new(Arc::new(source), ObserverConfig::default()).unwrap();
    let task = menu.start_discovery(observer).unwrap();

    feed.insert(buttons(&["Tool1", "Tool2", "Tool3"]));
    feed.insert("<p>unrelated</p>");
    drop(feed);
    assert_eq!(task.join.await.unwrap(), 3);

    let replies = menu.fetch().await;
    let chat: Vec<&str> = replies.chat.iter().map(|i| i.label.as_str()).collect();
    let global: Vec<&str> = replies.global.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(chat, vec!["Hi", "Tool2", "Tool1", "Tool3"]);
    assert_eq!(global, vec!["Bye"]);
    assert!(replies.find("Tool2").unwrap().is_standard);

    let chat_labels: HashSet<&str> = chat.iter().copied().collect();
    assert_eq!(chat_labels.len(), chat.len());
    assert!(global.iter().all(|label| !chat_labels.contains(label)));
    assert_eq!(menu.fetch().await, replies);

    let bye = replies.find("Bye").unwrap().clone();
    assert_eq!(menu.select(&bye).await, TriggerOutcome::Executed);
    let tool = replies.find("Tool1").unwrap().clone();
    assert_eq!(menu.select(&tool).await, TriggerOutcome::NotDispatched);
    assert_eq!(*dispatcher.calls.lock().await, vec!["B/Bye".to_string()]);

    menu.reset_discovery().await;
    assert_eq!(menu.fetch().await.chat.len(), 2);
}

#[tokio::test]
async fn test_missing_container_and_catalog() {
    let temp_dir = TempDir::new().unwrap();
    let menu = QuickReplyMenu::new(
        Arc::new(InMemoryCatalogProvider::new(None)),
        DiscoveryRegistry::new(),
        None,
        settings_in(&temp_dir),
    );

    let (source, _feed) = ChannelMutationSource::new("chat", buttons(&["Tool1"]));
    let observer = LiveButtonObserver::new(Arc::new(source), ObserverConfig::default()).unwrap();
    assert!(menu.start_discovery(observer).is_none());

    assert!(menu.fetch().await.is_empty());
    assert_eq!(
        menu.trigger_standard("A", "Hi").await,
        TriggerOutcome::DispatcherUnavailable
    );
}

#[tokio::test]
async fn test_unsubscribe_stops_discovery() {
    let temp_dir = TempDir::new().unwrap();
    let menu = QuickReplyMenu::new(
        Arc::new(InMemoryCatalogProvider::new(Some(catalog()))),
        DiscoveryRegistry::new(),
        None,
        settings_in(&temp_dir),
    );

    let (source, feed) = ChannelMutationSource::new("send_form", buttons(&["Tool1"]));
    let observer = LiveButtonObserver::new(Arc::new(source), ObserverConfig::default()).unwrap();
    let task = menu.start_discovery(observer).unwrap();

    while !menu.discovery_registry().contains("Tool1").await {
        tokio::task::yield_now().await;
    }
    task.handle.unsubscribe();
    assert_eq!(task.join.await.unwrap(), 1);

    assert!(!feed.insert(buttons(&["Late"])));
    assert!(!menu.discovery_registry().contains("Late").await);
}

#[tokio::test]
async fn test_settings_round_trip_through_both_backends() {
    let temp_dir = TempDir::new().unwrap();
    let data_url = format!("data:image/png;base64,{}", "Q".repeat(4096));

    let menu = QuickReplyMenu::new(
        Arc::new(InMemoryCatalogProvider::new(None)),
        DiscoveryRegistry::new(),
        None,
        settings_in(&temp_dir),
    );
    menu.load().await;
    menu.settings()
        .edit_form(|form| {
            form.icon_type = Some("custom".to_string());
            form.custom_icon_url = Some(TextControl::new(data_url.clone()));
            form.custom_icon_size = Some("28px".to_string());
        })
        .await;

    let report = menu.save().await;
    assert_eq!(report.local, BackendOutcome::Saved);
    assert_eq!(report.host, BackendOutcome::Saved);
    assert!(report.succeeded());

    // A fresh store sees the record through both the host seed and local load.
    let local = Arc::new(FileLocalStorage::new(QraPaths::local_storage_dir_in(
        temp_dir.path(),
    )));
    let host = Arc::new(TomlExtensionSettings::with_path(
        QraPaths::extension_settings_file_in(temp_dir.path()),
    ));
    let seeded = SettingsStore::initialize(local, Some(host)).await;
    assert_eq!(seeded.current().await.custom_icon_url, data_url);

    let config = seeded.load().await;
    assert_eq!(config.icon_type, IconType::Custom);
    assert_eq!(config.custom_icon_size, 28);
    assert_eq!(config.custom_icon_url, data_url);

    let form = seeded.form().await;
    let control = form.custom_icon_url.unwrap();
    assert_eq!(control.visible_value(), OVERSIZED_FIELD_PLACEHOLDER);
    assert_eq!(control.effective_value(), data_url);
}

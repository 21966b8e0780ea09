//! Extension configuration model.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Name under which the host stores this extension's settings.
pub const EXTENSION_NAME: &str = "quick-reply-assistant";

/// Key of the JSON record in the local fallback store.
pub const LOCAL_SETTINGS_KEY: &str = "QRA_settings";

/// Strings longer than this many UTF-16 code units are kept out of their input control.
pub const OVERSIZED_FIELD_THRESHOLD: usize = 1000;

/// Text shown in an input control whose value is held out-of-band.
pub const OVERSIZED_FIELD_PLACEHOLDER: &str =
    "[Image data saved; hidden from the input to keep the panel responsive]";

/// Icon size in pixels used when no valid size is configured.
pub const DEFAULT_CUSTOM_ICON_SIZE: u32 = 20;

/// Icon shown on the menu button.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum IconType {
    #[default]
    Rocket,
    Custom,
    FaCode,
}

/// Menu colours.
///
/// Every entry is optional: a stored style record replaces the defaults as a
/// whole, so entries it does not mention stay unset and the renderer falls
/// back to its stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuStyles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_bg_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_bg_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_border_color: Option<String>,
}

impl Default for MenuStyles {
    fn default() -> Self {
        Self {
            item_bg_color: Some("rgba(60, 60, 60, 0.7)".to_string()),
            item_text_color: Some("#ffffff".to_string()),
            title_color: Some("#cccccc".to_string()),
            title_border_color: Some("#444444".to_string()),
            empty_text_color: Some("#666666".to_string()),
            menu_bg_color: Some("rgba(0, 0, 0, 0.85)".to_string()),
            menu_border_color: Some("#555555".to_string()),
        }
    }
}

/// A custom icon the user saved for reuse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCustomIcon {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// The extension's configuration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub enabled: bool,
    pub icon_type: IconType,
    /// Image URL for the custom icon; often a large data URL.
    pub custom_icon_url: String,
    pub custom_icon_size: u32,
    /// Font Awesome markup for the `fa-code` icon type.
    pub fa_icon_code: String,
    /// Whether menu buttons copy the host's button colours.
    pub match_button_colors: bool,
    pub menu_styles: MenuStyles,
    pub saved_custom_icons: Vec<SavedCustomIcon>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            enabled: true,
            icon_type: IconType::Rocket,
            custom_icon_url: String::new(),
            custom_icon_size: DEFAULT_CUSTOM_ICON_SIZE,
            fa_icon_code: String::new(),
            match_button_colors: true,
            menu_styles: MenuStyles::default(),
            saved_custom_icons: Vec::new(),
        }
    }
}

impl Configuration {
    /// Top-level fields recognized in stored records.
    pub const FIELDS: [&'static str; 8] = [
        "enabled",
        "iconType",
        "customIconUrl",
        "customIconSize",
        "faIconCode",
        "matchButtonColors",
        "menuStyles",
        "savedCustomIcons",
    ];

    /// Repairs values that would break rendering.
    pub fn normalized(mut self) -> Self {
        if self.custom_icon_size == 0 {
            self.custom_icon_size = DEFAULT_CUSTOM_ICON_SIZE;
        }
        self
    }
}

//! Settings panel controls as seen by the settings store.

use super::model::{
    Configuration, DEFAULT_CUSTOM_ICON_SIZE, IconType, OVERSIZED_FIELD_PLACEHOLDER,
    OVERSIZED_FIELD_THRESHOLD,
};

/// A text input that can hold its real value out-of-band.
///
/// Values longer than [`OVERSIZED_FIELD_THRESHOLD`] UTF-16 code units are kept
/// in the control's metadata while the input itself shows a fixed placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextControl {
    value: String,
    out_of_band: Option<String>,
}

impl TextControl {
    pub fn new(value: impl Into<String>) -> Self {
        let mut control = Self::default();
        control.show(value.into());
        control
    }

    /// Displays a stored value, moving it out-of-band when oversized.
    pub fn show(&mut self, value: String) {
        if value.encode_utf16().count() > OVERSIZED_FIELD_THRESHOLD {
            self.value = OVERSIZED_FIELD_PLACEHOLDER.to_string();
            self.out_of_band = Some(value);
        } else {
            self.value = value;
            self.out_of_band = None;
        }
    }

    /// Replaces the value as if the user typed it.
    pub fn edit(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.out_of_band = None;
    }

    /// What the input displays.
    pub fn visible_value(&self) -> &str {
        &self.value
    }

    /// The value to persist: the out-of-band value when present.
    pub fn effective_value(&self) -> &str {
        self.out_of_band.as_deref().unwrap_or(&self.value)
    }

    pub fn is_out_of_band(&self) -> bool {
        self.out_of_band.is_some()
    }
}

/// Current values of the settings panel controls.
///
/// A `None` control is not rendered; it neither receives values on load nor
/// contributes on save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsForm {
    pub enabled: Option<bool>,
    /// Raw dropdown value (`rocket`, `custom`, `fa-code`).
    pub icon_type: Option<String>,
    pub custom_icon_url: Option<TextControl>,
    /// Raw text of the size input.
    pub custom_icon_size: Option<String>,
    pub fa_icon_code: Option<TextControl>,
    pub match_button_colors: Option<bool>,
}

impl SettingsForm {
    /// A form with every control rendered and empty.
    pub fn rendered() -> Self {
        Self {
            enabled: Some(false),
            icon_type: Some(String::new()),
            custom_icon_url: Some(TextControl::default()),
            custom_icon_size: Some(String::new()),
            fa_icon_code: Some(TextControl::default()),
            match_button_colors: Some(false),
        }
    }

    /// Shows `config` in the rendered controls.
    pub fn populate(&mut self, config: &Configuration) {
        if let Some(enabled) = self.enabled.as_mut() {
            *enabled = config.enabled;
        }
        if let Some(icon_type) = self.icon_type.as_mut() {
            *icon_type = config.icon_type.to_string();
        }
        if let Some(control) = self.custom_icon_url.as_mut() {
            control.show(config.custom_icon_url.clone());
        }
        if let Some(size) = self.custom_icon_size.as_mut() {
            *size = config.custom_icon_size.to_string();
        }
        if let Some(control) = self.fa_icon_code.as_mut() {
            control.show(config.fa_icon_code.clone());
        }
        if let Some(matched) = self.match_button_colors.as_mut() {
            *matched = config.match_button_colors;
        }
    }

    /// Copies the rendered controls' values into `config`.
    pub fn apply_to(&self, config: &mut Configuration) {
        if let Some(enabled) = self.enabled {
            config.enabled = enabled;
        }
        if let Some(raw) = self.icon_type.as_deref() {
            match raw.parse::<IconType>() {
                Ok(icon_type) => config.icon_type = icon_type,
                Err(_) => tracing::warn!(
                    "Unknown icon type '{}', keeping '{}'",
                    raw,
                    config.icon_type
                ),
            }
        }
        if let Some(control) = &self.custom_icon_url {
            config.custom_icon_url = control.effective_value().to_string();
        }
        if let Some(raw) = self.custom_icon_size.as_deref() {
            config.custom_icon_size = parse_leading_int(raw)
                .and_then(|size| u32::try_from(size).ok())
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_CUSTOM_ICON_SIZE);
        }
        if let Some(control) = &self.fa_icon_code {
            config.fa_icon_code = control.effective_value().to_string();
        }
        if let Some(matched) = self.match_button_colors {
            config.match_button_colors = matched;
        }
    }
}

/// Parses the leading integer of `raw` the way a lenient number input does:
/// leading whitespace and a sign are accepted, trailing text is ignored.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

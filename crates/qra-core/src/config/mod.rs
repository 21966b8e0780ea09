//! Extension configuration: the record, its panel controls and persistence seams.

mod form;
mod merge;
mod model;
mod repository;

pub use form::{SettingsForm, TextControl};
pub use merge::{MergeOutcome, shallow_merge};
pub use model::{
    Configuration, DEFAULT_CUSTOM_ICON_SIZE, EXTENSION_NAME, IconType, LOCAL_SETTINGS_KEY,
    MenuStyles, OVERSIZED_FIELD_PLACEHOLDER, OVERSIZED_FIELD_THRESHOLD, SavedCustomIcon,
};
pub use repository::{HostSettingsHook, LocalSettingsStore};

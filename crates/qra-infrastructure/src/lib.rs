pub mod catalog_provider;
pub mod extension_settings;
pub mod mutation_feed;
pub mod paths;
pub mod storage;

pub use crate::catalog_provider::{InMemoryCatalogProvider, JsonFileCatalogProvider};
pub use crate::extension_settings::TomlExtensionSettings;
pub use crate::mutation_feed::{ChannelMutationSource, MutationFeed};
pub use crate::storage::{FileLocalStorage, MemoryLocalStorage, TomlTableFile};

//! Storage layer: local fallback stores and the TOML extension settings file.

mod local_storage;
mod toml_table;

pub use local_storage::{FileLocalStorage, MemoryLocalStorage};
pub use toml_table::TomlTableFile;

//! Host quick reply catalog: schema, tolerant parser and provider seam.

mod parser;
mod provider;
pub mod schema;

pub use parser::{
    CatalogParse, CatalogStatus, SkipReason, SkippedEntry, catalog_enabled, parse_catalog,
};
pub use provider::CatalogProvider;

//! Host catalog provider trait.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Source of the host's quick reply catalog.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Returns the host's current quick reply settings object.
    ///
    /// `Ok(None)` means the host exposes no catalog at all.
    async fn snapshot(&self) -> Result<Option<Value>>;
}

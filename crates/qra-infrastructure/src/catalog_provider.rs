//! Host catalog providers.

use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::RwLock;

use qra_core::QraError;
use qra_core::catalog::CatalogProvider;
use qra_core::error::Result;

/// Reads the catalog from a JSON file exported by the host.
///
/// A missing file means the host exposes no catalog.
pub struct JsonFileCatalogProvider {
    path: PathBuf,
}

impl JsonFileCatalogProvider {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl CatalogProvider for JsonFileCatalogProvider {
    async fn snapshot(&self) -> Result<Option<Value>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            QraError::io(format!("Failed to read catalog {:?}: {}", self.path, e))
        })?;
        let value = serde_json::from_str(&content)?;
        Ok(Some(value))
    }
}

/// Catalog held in memory; the host replaces it as its settings change.
#[derive(Default)]
pub struct InMemoryCatalogProvider {
    catalog: RwLock<Option<Value>>,
}

impl InMemoryCatalogProvider {
    pub fn new(catalog: Option<Value>) -> Self {
        Self {
            catalog: RwLock::new(catalog),
        }
    }

    pub async fn replace(&self, catalog: Option<Value>) {
        *self.catalog.write().await = catalog;
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalogProvider {
    async fn snapshot(&self) -> Result<Option<Value>> {
        Ok(self.catalog.read().await.clone())
    }
}

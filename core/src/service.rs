//! Catalog service facade
//!
//! Async entry points used by the HTTP layer. Store access is blocking file
//! I/O, so every call runs on the blocking thread pool.

use crate::catalog::{CatalogStore, PluginRecord};
use crate::error::{MarketError, MarketResult};
use serde::Serialize;
use std::sync::Arc;

/// Liveness reported by [`CatalogService::health_check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<CatalogStore>,
    strict_reads: bool,
}

impl CatalogService {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self {
            store,
            strict_reads: false,
        }
    }

    /// Surface unreadable documents as errors instead of an empty catalog.
    pub fn with_strict_reads(mut self, strict_reads: bool) -> Self {
        self.strict_reads = strict_reads;
        self
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// List every plugin in document order.
    pub async fn list_plugins(&self) -> MarketResult<Vec<PluginRecord>> {
        let strict = self.strict_reads;
        self.run_blocking(move |store| {
            if strict {
                store.try_load()
            } else {
                Ok(store.load())
            }
        })
        .await
    }

    /// Look up a plugin by exact name. `Ok(None)` means not found.
    pub async fn get_plugin(&self, name: &str) -> MarketResult<Option<PluginRecord>> {
        let strict = self.strict_reads;
        let name = name.to_string();
        self.run_blocking(move |store| {
            if strict {
                store.try_find_by_name(&name)
            } else {
                Ok(store.find_by_name(&name))
            }
        })
        .await
    }

    pub fn health_check(&self) -> HealthStatus {
        HealthStatus::Healthy
    }

    async fn run_blocking<T, F>(&self, f: F) -> MarketResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&CatalogStore) -> MarketResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(&store))
            .await
            .map_err(|e| MarketError::Internal(format!("Catalog task failed: {}", e)))?
    }
}

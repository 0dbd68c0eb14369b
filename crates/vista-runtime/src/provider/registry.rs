//! Data provider lookup

use super::DataProvider;
use crate::error::{Result, RuntimeError};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Resolves provider keys to provider instances
pub trait DataProviderLocator: Send + Sync {
    /// Fails with a configuration error when the key is not registered
    fn get(&self, key: &str) -> Result<Arc<dyn DataProvider>>;
}

/// In-memory provider locator
#[derive(Default, Clone)]
pub struct DataProviderRegistry {
    providers: HashMap<String, Arc<dyn DataProvider>>,
}

impl DataProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under `key`, replacing any previous one
    pub fn register(&mut self, key: impl Into<String>, provider: Arc<dyn DataProvider>) {
        let key = key.into();
        debug!("Registering data provider: {}", key);
        self.providers.insert(key, provider);
    }

    /// Builder method variant of [`register`](Self::register)
    pub fn with(mut self, key: impl Into<String>, provider: Arc<dyn DataProvider>) -> Self {
        self.register(key, provider);
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.providers.contains_key(key)
    }

    /// Registered provider keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl DataProviderLocator for DataProviderRegistry {
    fn get(&self, key: &str) -> Result<Arc<dyn DataProvider>> {
        self.providers
            .get(key)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownDataProvider(key.to_string()))
    }
}

impl fmt::Debug for DataProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataProviderRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

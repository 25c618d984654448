use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::memory::MemoryStoreFactory;
use super::repository::{KeyValueStore, StoreError};

/// Which backend holds the submission history, and how to reach it.
///
/// `connection_string` is handed to the backend as-is: the `memory`
/// backend ignores it, `sqlite` takes a file path or `:memory:`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: String,
    pub connection_string: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: MemoryStoreFactory::NAME.to_string(),
            connection_string: String::new(),
        }
    }
}

/// Opens a [`KeyValueStore`] for one backend.
///
/// Backend crates export a unit struct implementing this, which the binary
/// registers with a [`StoreRegistry`] at start-up. `create` may run
/// migrations before returning.
#[async_trait]
pub trait StoreFactory: Send + Sync {
    fn backend_name(&self) -> &'static str;

    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn KeyValueStore>, StoreError>;
}

/// Backend factories keyed by name. Registering a name twice keeps the
/// later factory.
#[derive(Default)]
pub struct StoreRegistry {
    factories: BTreeMap<&'static str, Box<dyn StoreFactory>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that already knows the in-process `memory` backend.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(MemoryStoreFactory));
        registry
    }

    pub fn register(
        &mut self,
        factory: Box<dyn StoreFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Registered backend names in alphabetical order.
    pub fn available_backends(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Opens a store with the factory named by `config.backend`.
    ///
    /// An unregistered name yields [`StoreError::Configuration`] listing the
    /// names that are available. Factory errors pass through untouched.
    pub async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn KeyValueStore>, StoreError> {
        let Some(factory) = self.factories.get(config.backend.as_str()) else {
            return Err(StoreError::Configuration(format!(
                "unknown backend '{}'; available: {}",
                config.backend,
                self.available_backends().join(", ")
            )));
        };

        debug!(backend = factory.backend_name(), "creating store");
        factory.create(config).await
    }
}

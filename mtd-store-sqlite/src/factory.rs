use async_trait::async_trait;
use mtd_core::db::{KeyValueStore, StoreConfig, StoreError, StoreFactory};
use tracing::info;

use crate::repository::SqliteStore;

/// [`StoreFactory`] for SQLite.
///
/// Register this with a [`mtd_core::db::StoreRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use mtd_core::db::StoreRegistry;
/// use mtd_store_sqlite::SqliteStoreFactory;
///
/// let mut registry = StoreRegistry::with_builtin();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string` and bring
    /// its schema up to date.
    ///
    /// Accepted connection-string values:
    /// * A bare file path, e.g. `"mtd.db"`. The file is created if it does
    ///   not exist.
    /// * `":memory:"` for an ephemeral in-memory database.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn KeyValueStore>, StoreError> {
        let store = SqliteStore::new(&config.connection_string)
            .await
            .map_err(|e| StoreError::Connection(format!("{:#}", e)))?;
        store
            .run_migrations()
            .await
            .map_err(|e| StoreError::Database(format!("{:#}", e)))?;
        info!(database = %config.connection_string, "opened sqlite store");
        Ok(Box::new(store))
    }
}

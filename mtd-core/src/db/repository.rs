use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// A string-to-string store holding whole values under a key.
///
/// Values are replaced wholesale; there is no partial update.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, StoreError>;

    async fn put(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError>;

    /// Removes `key`. Returns [`StoreError::NotFound`] if it was absent.
    async fn remove(
        &self,
        key: &str,
    ) -> Result<(), StoreError>;
}

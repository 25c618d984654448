//! SQLite backend for the MTD key-value store.

mod factory;
mod repository;

pub use factory::SqliteStoreFactory;
pub use repository::SqliteStore;

pub mod factory;
pub mod history;
pub mod memory;
pub mod repository;

pub use factory::{StoreConfig, StoreFactory, StoreRegistry};
pub use history::{DEFAULT_HISTORY_KEY, HistoryRepository};
pub use memory::{MemoryStore, MemoryStoreFactory};
pub use repository::{KeyValueStore, StoreError};

pub mod calculations;
pub mod controller;
pub mod db;
pub mod models;

pub use controller::{SubmissionController, SubmissionError, SubmissionPhase, SubmissionSettings};
pub use db::{HistoryRepository, KeyValueStore, StoreConfig, StoreError, StoreRegistry};
pub use models::*;

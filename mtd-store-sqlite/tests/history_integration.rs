//! Submission history persisted through the SQLite backend.

use std::sync::Arc;

use mtd_core::controller::NoLatency;
use mtd_core::db::DEFAULT_HISTORY_KEY;
use mtd_core::{
    FormData, FormField, HistoryRepository, KeyValueStore, SimulatedGateway, StoreConfig,
    StoreRegistry, SubmissionController, SubmissionSettings,
};
use mtd_store_sqlite::SqliteStoreFactory;
use pretty_assertions::assert_eq;

fn filled_form() -> FormData {
    FormData::new()
        .with(FormField::Revenue, "1000")
        .with(FormField::Cogs, "400")
        .with(FormField::Expenses, "100")
        .with(FormField::Assets, "900")
        .with(FormField::Liabilities, "300")
        .with(FormField::Equity, "600")
        .with(FormField::Sales, "1000")
        .with(FormField::Purchases, "400")
        .with(FormField::VatCharged, "200")
        .with(FormField::VatPaid, "80")
        .with(FormField::Income, "500")
        .with(FormField::SelfAssessmentExpenses, "50")
}

async fn open(path: &str) -> Arc<dyn KeyValueStore> {
    let mut registry = StoreRegistry::with_builtin();
    registry.register(Box::new(SqliteStoreFactory));
    let config = StoreConfig {
        backend: "sqlite".to_string(),
        connection_string: path.to_string(),
    };
    Arc::from(registry.create(&config).await.expect("Should open sqlite store"))
}

fn controller(store: Arc<dyn KeyValueStore>) -> SubmissionController {
    SubmissionController::new(
        HistoryRepository::new(store, DEFAULT_HISTORY_KEY),
        &SubmissionSettings::default(),
    )
    .with_latency(Arc::new(NoLatency))
}

#[tokio::test]
async fn test_history_survives_reopening_the_database() {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let path = dir.path().join("mtd.db");
    let path = path.to_str().expect("Temp path should be UTF-8");

    let mut first = controller(open(path).await);
    first.login(&SimulatedGateway);
    first.replace_form(filled_form());
    first.submit().await.expect("Should submit");
    first.submit().await.expect("Should submit");
    let written = first.history().to_vec();
    drop(first);

    let store = open(path).await;
    let raw = store
        .get(DEFAULT_HISTORY_KEY)
        .await
        .expect("Should query")
        .expect("History should be stored");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("Should be JSON");
    assert_eq!(json.as_array().map(Vec::len), Some(2));

    let mut second = controller(store);
    second.rehydrate().await.expect("Should rehydrate");
    assert_eq!(second.history(), written.as_slice());
    assert_eq!(second.chart_counts().as_array(), [2, 2, 2, 2]);
}

#[tokio::test]
async fn test_unknown_backend_is_a_configuration_error() {
    let mut registry = StoreRegistry::with_builtin();
    registry.register(Box::new(SqliteStoreFactory));

    let config = StoreConfig {
        backend: "postgres".to_string(),
        connection_string: String::new(),
    };

    let result = registry.create(&config).await;

    assert!(matches!(result, Err(mtd_core::StoreError::Configuration(_))));
    assert_eq!(registry.available_backends(), vec!["memory", "sqlite"]);
}

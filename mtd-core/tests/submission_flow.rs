//! End-to-end submission flow through the public API, backed by the memory store.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mtd_core::controller::{FixedClock, NoLatency};
use mtd_core::db::{DEFAULT_HISTORY_KEY, MemoryStore};
use mtd_core::{
    FormData, FormField, HistoryRepository, IdentityProvider, KeyValueStore, SimulatedGateway,
    StoreConfig, StoreRegistry, SubmissionController, SubmissionError, SubmissionSettings, User,
};
use pretty_assertions::assert_eq;
use serde_json::Value;

fn complete_form() -> FormData {
    [
        (FormField::Revenue, "50000"),
        (FormField::Cogs, "20000"),
        (FormField::Expenses, "5000"),
        (FormField::NetProfit, "25000"),
        (FormField::Assets, "10000"),
        (FormField::Liabilities, "4000"),
        (FormField::Equity, "6000"),
        (FormField::Sales, "50000"),
        (FormField::Purchases, "20000"),
        (FormField::VatCharged, "10000"),
        (FormField::VatPaid, "4000"),
        (FormField::Income, "30000"),
        (FormField::SelfAssessmentExpenses, "5000"),
        (FormField::Allowances, "1000"),
    ]
    .into_iter()
    .map(|(field, value)| (field, value.to_string()))
    .collect()
}

fn controller(store: Arc<dyn KeyValueStore>) -> SubmissionController {
    SubmissionController::new(
        HistoryRepository::new(store, DEFAULT_HISTORY_KEY),
        &SubmissionSettings::default(),
    )
    .with_latency(Arc::new(NoLatency))
    .with_clock(Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2025, 4, 7, 12, 0, 0).unwrap(),
    )))
}

#[tokio::test]
async fn persisted_history_uses_camel_case_json() {
    let store = Arc::new(MemoryStore::new());
    let mut c = controller(store.clone());
    c.login(&SimulatedGateway);
    c.replace_form(complete_form());

    c.submit().await.unwrap();

    let raw = store.get(DEFAULT_HISTORY_KEY).await.unwrap().unwrap();
    let json: Value = serde_json::from_str(&raw).unwrap();
    let record = &json[0];

    assert_eq!(record["vat"]["periodKey"], "25A1");
    assert_eq!(record["vat"]["totalVatDue"], 10000.0);
    assert_eq!(record["vat"]["netVatDue"], 6000.0);
    assert_eq!(record["vat"]["totalValueSalesExVAT"], 50000.0);
    assert_eq!(record["vat"]["finalised"], true);
    assert_eq!(record["selfAssessment"]["allowances"], 1000.0);
    assert_eq!(record["profitAndLoss"]["netProfit"], 25000.0);
    assert_eq!(record["balanceSheet"]["equity"], 6000.0);
    assert_eq!(record["utr"], "1234567890");
    assert_eq!(record["timestamp"], "2025-04-07T12:00:00Z");
}

#[tokio::test]
async fn blank_optional_fields_are_recorded_as_null_and_zero() {
    let store = Arc::new(MemoryStore::new());
    let mut c = controller(store.clone());
    c.login(&SimulatedGateway);
    let mut form = complete_form();
    form.set(FormField::NetProfit, "");
    form.set(FormField::Allowances, "  ");
    c.replace_form(form);

    let record = c.submit().await.unwrap();

    assert_eq!(record.profit_and_loss.unwrap().net_profit, None);
    assert!(record.self_assessment.unwrap().allowances.is_zero());
}

#[tokio::test]
async fn unregistered_trader_above_threshold_is_rejected() {
    struct UnregisteredGateway;

    impl IdentityProvider for UnregisteredGateway {
        fn login(&self) -> User {
            User {
                vat_registered: false,
                ..SimulatedGateway.login()
            }
        }
    }

    let mut c = controller(Arc::new(MemoryStore::new()));
    c.login(&UnregisteredGateway);
    let mut form = complete_form();
    form.set(FormField::Sales, "90000");
    c.replace_form(form);

    let err = c.submit().await.unwrap_err();

    assert!(matches!(err, SubmissionError::Validation(_)));
    assert_eq!(
        c.status_message(),
        Some("Sales exceed £85,000. VAT registration required.")
    );
    assert!(c.history().is_empty());
}

#[tokio::test]
async fn registry_built_store_survives_a_restart() {
    let registry = StoreRegistry::with_builtin();
    let store: Arc<dyn KeyValueStore> = Arc::from(
        registry
            .create(&StoreConfig::default())
            .await
            .unwrap(),
    );

    let mut first = controller(store.clone());
    first.login(&SimulatedGateway);
    first.replace_form(complete_form());
    first.submit().await.unwrap();

    let mut second = controller(store);
    assert_eq!(second.rehydrate().await.unwrap(), 1);
    assert_eq!(second.chart_counts().as_array(), [1, 1, 1, 1]);
}

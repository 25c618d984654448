//! Integration tests that exercise the prefill loader against an on-disk
//! fixture and carry the result through a submission.

use std::path::Path;
use std::sync::Arc;

use mtd_core::controller::NoLatency;
use mtd_core::db::{DEFAULT_HISTORY_KEY, MemoryStore};
use mtd_core::{
    FormField, HistoryRepository, SimulatedGateway, SubmissionController, SubmissionSettings,
};
use mtd_ui::csv_loader;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

/// Path to the sample CSV shipped with the test fixtures.
fn fixture_path() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_form.csv")
        .leak()
}

#[test]
fn test_load_fixture_file_succeeds() {
    let form = csv_loader::load_from_file(fixture_path()).expect("fixture file should load");

    assert_eq!(form.get(FormField::Revenue), "120000");
    assert_eq!(form.get(FormField::VatPaid), "6000");
    assert_eq!(form.get(FormField::NetProfit), "");
    assert_eq!(form.get(FormField::Allowances), "");
}

#[test]
fn test_load_nonexistent_file_returns_err() {
    let result = csv_loader::load_from_file(Path::new("/this/path/does/not/exist.csv"));
    assert!(result.is_err());
}

#[tokio::test]
async fn test_prefilled_form_submits() {
    let form = csv_loader::load_from_file(fixture_path()).unwrap();
    let repository = HistoryRepository::new(Arc::new(MemoryStore::new()), DEFAULT_HISTORY_KEY);
    let mut controller = SubmissionController::new(repository, &SubmissionSettings::default())
        .with_latency(Arc::new(NoLatency));
    controller.login(&SimulatedGateway);
    controller.replace_form(form);

    let record = controller.submit().await.expect("prefilled form should submit");

    let vat = record.vat.expect("vat payload");
    assert_eq!(vat.net_vat_due, dec!(10000));
    assert_eq!(record.profit_and_loss.expect("p&l payload").net_profit, None);
}

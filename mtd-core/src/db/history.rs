use std::sync::Arc;

use tracing::debug;

use super::repository::{KeyValueStore, StoreError};
use crate::models::SubmissionRecord;

/// Storage key the submission history is kept under by default.
pub const DEFAULT_HISTORY_KEY: &str = "financialRecords";

/// Reads and writes the whole submission history as one JSON array under a
/// single key of a [`KeyValueStore`].
#[derive(Clone)]
pub struct HistoryRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl HistoryRepository {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the persisted history. An absent key is an empty history.
    pub async fn load(&self) -> Result<Vec<SubmissionRecord>, StoreError> {
        match self.store.get(&self.key).await? {
            Some(json) => {
                let history: Vec<SubmissionRecord> = serde_json::from_str(&json)?;
                debug!(key = %self.key, records = history.len(), "loaded submission history");
                Ok(history)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Overwrites the persisted history with `history`.
    pub async fn save(
        &self,
        history: &[SubmissionRecord],
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string(history)?;
        self.store.put(&self.key, &json).await?;
        debug!(key = %self.key, records = history.len(), "saved submission history");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::db::MemoryStore;
    use crate::models::{
        BalanceSheetPayload, ProfitAndLossPayload, ReportPayloads, SelfAssessmentPayload,
        VatPayload,
    };

    fn record() -> SubmissionRecord {
        let payloads = ReportPayloads {
            vat: VatPayload {
                period_key: "25A1".to_string(),
                vat_due_sales: dec!(500),
                vat_due_acquisitions: dec!(0),
                total_vat_due: dec!(500),
                vat_reclaimed_curr_period: dec!(200),
                net_vat_due: dec!(300),
                total_value_sales_ex_vat: dec!(80000),
                total_value_purchases_ex_vat: dec!(30000),
                total_value_goods_supplied_ex_vat: dec!(0),
                total_acquisitions_ex_vat: dec!(0),
                finalised: true,
            },
            self_assessment: SelfAssessmentPayload {
                income: dec!(60000),
                expenses: dec!(10000),
                allowances: dec!(0),
            },
            profit_and_loss: ProfitAndLossPayload {
                revenue: dec!(120000),
                cogs: dec!(40000),
                expenses: dec!(20000),
                net_profit: None,
            },
            balance_sheet: BalanceSheetPayload {
                assets: dec!(120),
                liabilities: dec!(60),
                equity: dec!(50),
            },
        };
        SubmissionRecord::new(
            payloads,
            "1234567890",
            Utc.with_ymd_and_hms(2026, 1, 31, 9, 30, 0).unwrap(),
        )
    }

    fn repository() -> (Arc<MemoryStore>, HistoryRepository) {
        let store = Arc::new(MemoryStore::new());
        let repo = HistoryRepository::new(store.clone(), DEFAULT_HISTORY_KEY);
        (store, repo)
    }

    #[tokio::test]
    async fn absent_key_loads_empty_history() {
        let (_, repo) = repository();

        assert_eq!(repo.load().await, Ok(Vec::new()));
    }

    #[tokio::test]
    async fn saved_history_loads_back() {
        let (_, repo) = repository();
        let history = vec![record(), record()];

        repo.save(&history).await.unwrap();

        assert_eq!(repo.load().await.unwrap(), history);
    }

    #[tokio::test]
    async fn history_is_stored_as_json_array_under_key() {
        let (store, repo) = repository();
        repo.save(&[record()]).await.unwrap();

        let raw = store.get("financialRecords").await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(json.as_array().map(Vec::len), Some(1));
        assert_eq!(json[0]["utr"], "1234567890");
        assert_eq!(json[0]["status"], "Submitted");
        assert_eq!(json[0]["timestamp"], "2026-01-31T09:30:00Z");
        assert_eq!(json[0]["selfAssessment"]["income"], 60000.0);
        assert!(json[0]["profitAndLoss"]["netProfit"].is_null());
    }

    #[tokio::test]
    async fn corrupt_blob_is_a_serialization_error() {
        let (store, repo) = repository();
        store.put(DEFAULT_HISTORY_KEY, "not json").await.unwrap();

        assert!(matches!(
            repo.load().await,
            Err(StoreError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn records_missing_a_report_still_load() {
        let (store, repo) = repository();
        store
            .put(
                DEFAULT_HISTORY_KEY,
                r#"[{"vat":null,"timestamp":"2026-01-31T09:30:00Z","utr":"1"}]"#,
            )
            .await
            .unwrap();

        let history = repo.load().await.unwrap();

        assert_eq!(history.len(), 1);
        assert!(history[0].vat.is_none());
        assert!(history[0].balance_sheet.is_none());
    }
}

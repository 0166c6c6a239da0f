//! Record fetch abstractions and the raw matter snapshot

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Raw field values of a matter record as returned by the record API.
///
/// Every financial field is optional: matters freshly opened in the platform
/// carry no accounting data yet. Fields this crate does not consume are
/// ignored during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatterRecord {
    pub account_id: Option<String>,
    pub trust_balance: Option<f64>,
    pub retainer_amount: Option<f64>,
    pub work_in_progress_fees: Option<f64>,
    pub work_in_progress_expenses: Option<f64>,
    pub total_fees_worked: Option<f64>,
    pub total_expenses_worked: Option<f64>,
}

#[async_trait]
pub trait RecordProvider: Send + Sync {
    async fn fetch_record(&self, record_id: &str) -> Result<MatterRecord>;
}

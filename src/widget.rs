//! Matter widget state machine and its read-only view
//!
//! One widget tracks one record id. Each refresh replaces the whole state
//! atomically: a fetch error discards the previous snapshot so stale figures
//! can never be observed alongside an error message.

use tracing::{debug, error};

use crate::financials::MatterFinancials;
use crate::money::format_currency;
use crate::record::RecordProvider;

#[derive(Debug, Clone, PartialEq)]
enum WidgetState {
    Loading,
    Loaded {
        financials: MatterFinancials,
        account_id: Option<String>,
    },
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct MatterWidget {
    record_id: String,
    state: WidgetState,
}

impl MatterWidget {
    pub fn new(record_id: impl Into<String>) -> Self {
        MatterWidget {
            record_id: record_id.into(),
            state: WidgetState::Loading,
        }
    }

    pub fn record_id(&self) -> &str {
        &self.record_id
    }

    /// Fetches the record once and replaces the current state with the
    /// outcome. The host decides when to call this; the widget never polls.
    pub async fn refresh(&mut self, provider: &(dyn RecordProvider + Send + Sync)) {
        match provider.fetch_record(&self.record_id).await {
            Ok(record) => {
                debug!("Loaded matter record {}", self.record_id);
                self.state = WidgetState::Loaded {
                    financials: MatterFinancials::from_record(&record),
                    account_id: record.account_id,
                };
            }
            Err(e) => {
                error!("Failed to load matter {}: {e:#}", self.record_id);
                self.state =
                    WidgetState::Failed(format!("Error loading matter {}: {e:#}", self.record_id));
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, WidgetState::Loading)
    }

    pub fn financials(&self) -> Option<&MatterFinancials> {
        match &self.state {
            WidgetState::Loaded { financials, .. } => Some(financials),
            _ => None,
        }
    }

    /// Linked account id, surfaced for diagnostics only.
    pub fn account_id(&self) -> Option<&str> {
        match &self.state {
            WidgetState::Loaded { account_id, .. } => account_id.as_deref(),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            WidgetState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// One figure of the output surface: raw value plus its display string.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub amount: f64,
    pub formatted: String,
}

impl Figure {
    fn new(amount: f64, symbol: &str) -> Self {
        Figure {
            amount,
            formatted: format_currency(amount, symbol),
        }
    }
}

/// Read-only projection of a widget for the rendering layer. `figures` is
/// `None` while loading and after a failed fetch.
#[derive(Debug, Clone)]
pub struct MatterView {
    pub record_id: String,
    pub error: Option<String>,
    pub figures: Option<MatterFigures>,
}

#[derive(Debug, Clone)]
pub struct MatterFigures {
    pub trust_balance: Figure,
    pub retainer_amount: Figure,
    pub work_in_progress: Figure,
    pub total_worked: Figure,
    pub billed: Figure,
    pub retainer_shortfall: Figure,
    pub pay_to_maintain_retainer: Figure,
    pub balance_due: Figure,
    pub credit_available: Figure,
    pub has_credit: bool,
    pub indicator_label: &'static str,
    pub indicator: Figure,
}

impl MatterView {
    pub fn from_widget(widget: &MatterWidget, symbol: &str) -> Self {
        let figures = widget.financials().map(|f| {
            let (indicator_label, indicator_amount) = f.balance_indicator();
            MatterFigures {
                trust_balance: Figure::new(f.trust_balance, symbol),
                retainer_amount: Figure::new(f.retainer_amount, symbol),
                work_in_progress: Figure::new(f.work_in_progress(), symbol),
                total_worked: Figure::new(f.total_worked(), symbol),
                billed: Figure::new(f.billed(), symbol),
                retainer_shortfall: Figure::new(f.retainer_shortfall(), symbol),
                pay_to_maintain_retainer: Figure::new(f.pay_to_maintain_retainer(), symbol),
                balance_due: Figure::new(f.balance_due(), symbol),
                credit_available: Figure::new(f.credit_available(), symbol),
                has_credit: f.has_credit(),
                indicator_label,
                indicator: Figure::new(indicator_amount, symbol),
            }
        });

        MatterView {
            record_id: widget.record_id().to_string(),
            error: widget.error().map(str::to_string),
            figures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MatterRecord;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct MockRecordProvider {
        records: HashMap<String, MatterRecord>,
        errors: HashMap<String, String>,
    }

    impl MockRecordProvider {
        fn new() -> Self {
            MockRecordProvider {
                records: HashMap::new(),
                errors: HashMap::new(),
            }
        }

        fn add_record(&mut self, record_id: &str, record: MatterRecord) {
            self.records.insert(record_id.to_string(), record);
        }

        fn add_error(&mut self, record_id: &str, error_msg: &str) {
            self.errors
                .insert(record_id.to_string(), error_msg.to_string());
        }
    }

    #[async_trait]
    impl RecordProvider for MockRecordProvider {
        async fn fetch_record(&self, record_id: &str) -> Result<MatterRecord> {
            if let Some(error_msg) = self.errors.get(record_id) {
                return Err(anyhow!(error_msg.clone()));
            }
            self.records
                .get(record_id)
                .cloned()
                .ok_or_else(|| anyhow!("Record not found: {}", record_id))
        }
    }

    fn sample_record() -> MatterRecord {
        MatterRecord {
            account_id: Some("0015f00000AbCdE".to_string()),
            trust_balance: Some(2000.0),
            retainer_amount: Some(1500.0),
            work_in_progress_fees: Some(200.0),
            work_in_progress_expenses: Some(50.0),
            total_fees_worked: Some(900.0),
            total_expenses_worked: Some(100.0),
        }
    }

    #[tokio::test]
    async fn test_widget_starts_loading() {
        let widget = MatterWidget::new("a0X1");
        assert!(widget.is_loading());
        assert!(widget.financials().is_none());
        assert!(widget.error().is_none());
    }

    #[tokio::test]
    async fn test_refresh_loads_snapshot() {
        let mut provider = MockRecordProvider::new();
        provider.add_record("a0X1", sample_record());

        let mut widget = MatterWidget::new("a0X1");
        widget.refresh(&provider).await;

        assert!(!widget.is_loading());
        assert!(widget.error().is_none());
        assert_eq!(widget.account_id(), Some("0015f00000AbCdE"));
        let financials = widget.financials().expect("snapshot should be loaded");
        assert_eq!(financials.work_in_progress(), 250.0);
        assert_eq!(financials.credit_available(), 1750.0);
    }

    #[tokio::test]
    async fn test_fetch_error_clears_prior_snapshot() {
        let mut provider = MockRecordProvider::new();
        provider.add_record("a0X1", sample_record());

        let mut widget = MatterWidget::new("a0X1");
        widget.refresh(&provider).await;
        assert!(widget.financials().is_some());

        let mut failing = MockRecordProvider::new();
        failing.add_error("a0X1", "insufficient access");
        widget.refresh(&failing).await;

        assert!(widget.financials().is_none());
        assert!(widget.account_id().is_none());
        let message = widget.error().expect("error message should be recorded");
        assert!(message.contains("a0X1"));
        assert!(message.contains("insufficient access"));
    }

    #[tokio::test]
    async fn test_view_formats_all_figures() {
        let mut provider = MockRecordProvider::new();
        provider.add_record("a0X1", sample_record());

        let mut widget = MatterWidget::new("a0X1");
        widget.refresh(&provider).await;

        let view = MatterView::from_widget(&widget, "$");
        let figures = view.figures.expect("figures should be present");

        assert_eq!(figures.trust_balance.formatted, "$2,000.00");
        assert_eq!(figures.work_in_progress.formatted, "$250.00");
        assert_eq!(figures.total_worked.formatted, "$1,000.00");
        assert_eq!(figures.billed.formatted, "$750.00");
        assert_eq!(figures.retainer_shortfall.formatted, "$0.00");
        assert_eq!(figures.balance_due.formatted, "$250.00");
        assert!(figures.has_credit);
        assert_eq!(figures.indicator_label, "Total Credit Available");
        assert_eq!(figures.indicator.formatted, "$1,750.00");
    }

    #[tokio::test]
    async fn test_view_of_failed_widget_withholds_figures() {
        let mut provider = MockRecordProvider::new();
        provider.add_error("a0X1", "network unreachable");

        let mut widget = MatterWidget::new("a0X1");
        widget.refresh(&provider).await;

        let view = MatterView::from_widget(&widget, "$");
        assert!(view.figures.is_none());
        assert!(view.error.unwrap().contains("network unreachable"));
    }

    #[tokio::test]
    async fn test_view_shows_balance_due_when_underfunded() {
        let mut provider = MockRecordProvider::new();
        provider.add_record(
            "a0X2",
            MatterRecord {
                trust_balance: Some(1000.0),
                retainer_amount: Some(1500.0),
                work_in_progress_fees: Some(200.0),
                work_in_progress_expenses: Some(50.0),
                ..Default::default()
            },
        );

        let mut widget = MatterWidget::new("a0X2");
        widget.refresh(&provider).await;

        let figures = MatterView::from_widget(&widget, "$")
            .figures
            .expect("figures should be present");
        assert!(!figures.has_credit);
        assert_eq!(figures.retainer_shortfall.formatted, "$500.00");
        assert_eq!(figures.pay_to_maintain_retainer.formatted, "$500.00");
        assert_eq!(figures.indicator_label, "Total Balance Due");
        assert_eq!(figures.indicator.formatted, "$750.00");
    }
}

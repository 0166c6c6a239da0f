//! Financial derivation over a matter snapshot
//!
//! All derivations are pure arithmetic over the six raw fields. Absent or
//! non-finite inputs degrade to zero, so nothing in here can fail.

use crate::record::MatterRecord;

/// Labels for the combined balance/credit indicator.
pub const LABEL_CREDIT_AVAILABLE: &str = "Total Credit Available";
pub const LABEL_BALANCE_DUE: &str = "Total Balance Due";

/// Immutable snapshot of the six raw financial fields of a matter.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MatterFinancials {
    pub trust_balance: f64,
    pub retainer_amount: f64,
    pub wip_fees: f64,
    pub wip_expenses: f64,
    pub total_fees_worked: f64,
    pub total_expenses_worked: f64,
}

fn sanitize(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

impl MatterFinancials {
    /// Builds a snapshot from a raw record, defaulting missing fields to zero.
    pub fn from_record(record: &MatterRecord) -> Self {
        MatterFinancials {
            trust_balance: sanitize(record.trust_balance),
            retainer_amount: sanitize(record.retainer_amount),
            wip_fees: sanitize(record.work_in_progress_fees),
            wip_expenses: sanitize(record.work_in_progress_expenses),
            total_fees_worked: sanitize(record.total_fees_worked),
            total_expenses_worked: sanitize(record.total_expenses_worked),
        }
    }

    /// Unbilled fees plus unbilled expenses.
    pub fn work_in_progress(&self) -> f64 {
        self.wip_fees + self.wip_expenses
    }

    /// Cumulative fees plus expenses worked to date.
    pub fn total_worked(&self) -> f64 {
        self.total_fees_worked + self.total_expenses_worked
    }

    /// Worked minus unbilled. Can go negative when WIP outruns the totals.
    pub fn billed(&self) -> f64 {
        self.total_worked() - self.work_in_progress()
    }

    /// Amount by which the trust balance is below the required retainer.
    pub fn retainer_shortfall(&self) -> f64 {
        (self.retainer_amount - self.trust_balance).max(0.0)
    }

    /// Action-bar figure: the payment that would restore the retainer.
    pub fn pay_to_maintain_retainer(&self) -> f64 {
        self.retainer_shortfall()
    }

    /// Outstanding charges: WIP plus any retainer shortfall.
    pub fn balance_due(&self) -> f64 {
        self.work_in_progress() + self.retainer_shortfall()
    }

    /// Trust funds beyond current charges, only when the retainer is fully
    /// funded (non-strict threshold: an exactly-met retainer is eligible).
    pub fn credit_available(&self) -> f64 {
        if self.trust_balance >= self.retainer_amount {
            (self.trust_balance - self.work_in_progress()).max(0.0)
        } else {
            0.0
        }
    }

    pub fn has_credit(&self) -> bool {
        self.credit_available() > 0.0
    }

    /// The single label/value pair shown in the summary box: credit when any
    /// is available, otherwise the balance due.
    pub fn balance_indicator(&self) -> (&'static str, f64) {
        if self.has_credit() {
            (LABEL_CREDIT_AVAILABLE, self.credit_available())
        } else {
            (LABEL_BALANCE_DUE, self.balance_due())
        }
    }
}

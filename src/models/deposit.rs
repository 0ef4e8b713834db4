//! Deposit (dues payment) model and the submission status state machine
//!
//! Amounts are stored as text, exactly as submitted, and parsed as floating
//! point at aggregation time; a malformed amount is an aggregation-time data
//! error, not a storage error.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::DepositId;
use super::period::{Month, Period};

/// Status of a deposit, expense, or received fund submission
///
/// Transitions are monotonic: `Pending` may move to `Accepted` or
/// `Rejected`; both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SubmissionStatus {
    /// Awaiting an approver's decision
    #[default]
    Pending,
    /// Approved; counts toward aggregation
    Accepted,
    /// Declined; excluded from aggregation
    Rejected,
}

impl SubmissionStatus {
    /// Check whether this status admits no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Accepted => write!(f, "Accepted"),
            Self::Rejected => write!(f, "Rejected"),
        }
    }
}

/// Structured composite identity of a dues submission
///
/// Replaces the legacy `email_month_year_status` concatenation: compared by
/// value, so a delimiter inside any field cannot cause a silent collision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DedupKey {
    pub email: String,
    pub period: Period,
    pub status: SubmissionStatus,
}

/// A member's dues payment submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deposit {
    /// Unique identifier
    pub id: DepositId,

    /// Submitting member's email (foreign key into the roster)
    pub email: String,

    /// Dues month, stored by full English name
    pub month: Month,

    /// Dues year
    pub year: i32,

    /// Payment method name (name-keyed reference)
    pub payment_method: String,

    /// Account or mobile number the payment was sent from
    pub number: String,

    /// Transaction id issued by the payment channel; unique across deposits
    pub transaction_id: String,

    /// Amount as submitted, parsed as floating point at aggregation time
    pub amount: String,

    /// Approval state
    #[serde(default)]
    pub status: SubmissionStatus,
}

impl Deposit {
    /// The dues period this deposit settles
    pub fn period(&self) -> Period {
        Period::new(self.month, self.year)
    }

    /// Derived dedup key for this deposit
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            email: self.email.clone(),
            period: self.period(),
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_deposit() -> Deposit {
        Deposit {
            id: DepositId::new(),
            email: "alice@club.org".into(),
            month: Month::January,
            year: 2024,
            payment_method: "bKash".into(),
            number: "01700000000".into(),
            transaction_id: "TRX123".into(),
            amount: "100".into(),
            status: SubmissionStatus::Pending,
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(!SubmissionStatus::Pending.is_terminal());
        assert!(SubmissionStatus::Accepted.is_terminal());
        assert!(SubmissionStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_dedup_key_compared_by_value() {
        let a = sample_deposit();
        let mut b = sample_deposit();
        b.transaction_id = "TRX456".into();
        b.amount = "150".into();
        // Same member, period, and status share a dedup key regardless of
        // the other fields.
        assert_eq!(a.dedup_key(), b.dedup_key());

        b.status = SubmissionStatus::Accepted;
        assert_ne!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_period_accessor() {
        let deposit = sample_deposit();
        assert_eq!(deposit.period().label(), "January-2024");
    }
}

//! Expense (reimbursable spending) model
//!
//! An expense has no transaction id at submission time; the approver assigns
//! one when accepting. The receipt URL comes from the external object-storage
//! collaborator and is treated as opaque.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::deposit::SubmissionStatus;
use super::ids::ExpenseId;
use super::period::Period;

/// A member's reimbursable spending submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Submitting member's email
    pub email: String,

    /// Short title of the spending
    pub title: String,

    /// Longer free-text details
    #[serde(default)]
    pub details: String,

    /// Calendar date of the spending; its month and year key the aggregates
    pub date: NaiveDate,

    /// Amount as submitted, parsed as floating point at aggregation time
    pub amount: String,

    /// Payment method name (name-keyed reference)
    pub payment_method: String,

    /// Reimbursement details (where to send the money back)
    pub payment_method_details: String,

    /// Opaque receipt URL from the object-storage collaborator
    #[serde(default)]
    pub file_url: String,

    /// Approval state
    #[serde(default)]
    pub status: SubmissionStatus,

    /// Assigned by the approver on acceptance; unique across expenses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl Expense {
    /// The period this expense falls in, derived from its calendar date
    /// with the same month naming deposits use
    pub fn period(&self) -> Period {
        Period::from_date(self.date)
    }
}

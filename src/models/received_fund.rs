//! Received fund model
//!
//! Money arriving from outside the roster (sponsorships, donations).
//! Structurally a deposit, but sourced externally; kept as a separate series
//! and never merged into member dues aggregation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::deposit::SubmissionStatus;
use super::ids::ReceivedFundId;

/// A fund received from an external payer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceivedFund {
    /// Unique identifier
    pub id: ReceivedFundId,

    /// Date the fund arrived
    pub date: NaiveDate,

    /// Payer; free text, not necessarily a member
    pub payer: String,

    /// Short title of the fund
    pub title: String,

    /// Longer free-text description
    #[serde(default)]
    pub description: String,

    /// Payment method name (name-keyed reference)
    pub payment_method: String,

    /// Account or mobile number the fund was sent from
    #[serde(default)]
    pub number: String,

    /// Transaction id issued by the payment channel
    pub transaction_id: String,

    /// Amount as submitted
    pub amount: String,

    /// Approval state
    #[serde(default)]
    pub status: SubmissionStatus,

    /// Email of the member who recorded the fund
    pub email: String,
}

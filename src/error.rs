//! Custom error types for club-ledger
//!
//! This module defines the error hierarchy for the engine using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for club-ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for submitted data (missing/malformed required field)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Dedup-key or transaction-id collision, blocked before any write
    #[error("Duplicate submission: {0}")]
    Duplicate(String),

    /// Attempted transition of an already-terminal record
    #[error("Record already finalized: {0}")]
    Conflict(String),

    /// Non-numeric amount encountered during aggregation
    #[error("Malformed amount '{value}' on record {record}")]
    NumericFormat { record: String, value: String },

    /// Store write rejected (network/permission/disk)
    #[error("Store write failed: {0}")]
    UpstreamWrite(String),

    /// Mail dispatch failed for one or more recipients
    #[error("Notification failed for {failed} of {attempted} recipients")]
    Notification { attempted: usize, failed: usize },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Create a "not found" error for members
    pub fn member_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Member",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for departments
    pub fn department_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Department",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for payment methods
    pub fn payment_method_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "PaymentMethod",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for deposits
    pub fn deposit_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Deposit",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for received funds
    pub fn received_fund_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "ReceivedFund",
            identifier: identifier.into(),
        }
    }

    /// Duplicate dues submission for an already-settled period
    pub fn period_already_recorded() -> Self {
        Self::Duplicate("payment for this period already recorded".into())
    }

    /// Duplicate transaction id within a submission series
    pub fn transaction_already_recorded() -> Self {
        Self::Duplicate("transaction ID already exists".into())
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a duplicate-submission error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for club-ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::member_not_found("nobody@club.org");
        assert_eq!(err.to_string(), "Member not found: nobody@club.org");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_duplicate_messages() {
        assert_eq!(
            LedgerError::period_already_recorded().to_string(),
            "Duplicate submission: payment for this period already recorded"
        );
        assert_eq!(
            LedgerError::transaction_already_recorded().to_string(),
            "Duplicate submission: transaction ID already exists"
        );
    }

    #[test]
    fn test_notification_error() {
        let err = LedgerError::Notification {
            attempted: 5,
            failed: 2,
        };
        assert_eq!(err.to_string(), "Notification failed for 2 of 5 recipients");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ledger_err: LedgerError = io_err.into();
        assert!(matches!(ledger_err, LedgerError::Io(_)));
    }
}

//! Submission intake: validation and admission of new records
//!
//! The duplicate checks here are pure functions over a snapshot, usable by a
//! presentation layer for early feedback. Admission itself goes through the
//! store's conditional writes, so a stale snapshot can never admit a
//! duplicate; these checks are advisory, the store's are authoritative.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    DedupKey, Deposit, DepositId, Expense, ExpenseId, Member, Month, Period, ReceivedFund,
    ReceivedFundId, SubmissionStatus,
};
use crate::store::{LedgerSnapshot, LedgerStore};

/// Which record series a transaction id is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Deposits,
    Expenses,
    ReceivedFunds,
}

/// Check whether a deposit sharing the given dedup key already exists
pub fn duplicate_deposit_exists(
    snapshot: &LedgerSnapshot,
    email: &str,
    period: Period,
    status: SubmissionStatus,
) -> bool {
    let key = DedupKey {
        email: email.to_string(),
        period,
        status,
    };
    snapshot.deposits.iter().any(|d| d.dedup_key() == key)
}

/// Check whether a transaction id is already recorded in a series
pub fn duplicate_transaction_exists(
    snapshot: &LedgerSnapshot,
    series: Series,
    transaction_id: &str,
) -> bool {
    match series {
        Series::Deposits => snapshot
            .deposits
            .iter()
            .any(|d| d.transaction_id == transaction_id),
        Series::Expenses => snapshot
            .expenses
            .iter()
            .any(|e| e.transaction_id.as_deref() == Some(transaction_id)),
        Series::ReceivedFunds => snapshot
            .received_funds
            .iter()
            .any(|f| f.transaction_id == transaction_id),
    }
}

fn require(field: &str, value: &str) -> LedgerResult<()> {
    if value.trim().is_empty() {
        return Err(LedgerError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// A dues payment as submitted by a member
#[derive(Debug, Clone)]
pub struct NewDeposit {
    pub email: String,
    pub month: Month,
    pub year: i32,
    pub payment_method: String,
    pub number: String,
    pub transaction_id: String,
    pub amount: String,
}

/// A reimbursable expense as submitted by a member
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub email: String,
    pub title: String,
    pub details: String,
    pub date: chrono::NaiveDate,
    pub amount: String,
    pub payment_method: String,
    pub payment_method_details: String,
    pub file_url: String,
}

/// An external fund as recorded by a member
#[derive(Debug, Clone)]
pub struct NewReceivedFund {
    pub email: String,
    pub date: chrono::NaiveDate,
    pub payer: String,
    pub title: String,
    pub description: String,
    pub payment_method: String,
    pub number: String,
    pub transaction_id: String,
    pub amount: String,
}

/// Service admitting new submissions into the store
pub struct SubmissionService<'a> {
    store: &'a LedgerStore,
}

impl<'a> SubmissionService<'a> {
    /// Create a submission service over the given store
    pub fn new(store: &'a LedgerStore) -> Self {
        Self { store }
    }

    fn require_member(&self, email: &str) -> LedgerResult<Member> {
        self.store
            .members
            .get_by_email(email)?
            .ok_or_else(|| LedgerError::member_not_found(email.to_string()))
    }

    fn require_payment_method(&self, name: &str) -> LedgerResult<()> {
        if self.store.payment_methods.get_by_name(name)?.is_none() {
            return Err(LedgerError::payment_method_not_found(name.to_string()));
        }
        Ok(())
    }

    /// Register a new member on the roster
    pub fn register_member(&self, member: Member) -> LedgerResult<Member> {
        let member = self.store.members.register(member)?;
        self.store.publish()?;
        Ok(member)
    }

    /// Submit a dues deposit; it enters the store as Pending
    pub fn submit_deposit(&self, submission: NewDeposit) -> LedgerResult<Deposit> {
        require("email", &submission.email)?;
        require("payment method", &submission.payment_method)?;
        require("number", &submission.number)?;
        require("transaction id", &submission.transaction_id)?;
        require("amount", &submission.amount)?;
        self.require_member(&submission.email)?;
        self.require_payment_method(&submission.payment_method)?;

        let deposit = Deposit {
            id: DepositId::new(),
            email: submission.email,
            month: submission.month,
            year: submission.year,
            payment_method: submission.payment_method,
            number: submission.number,
            transaction_id: submission.transaction_id,
            amount: submission.amount,
            status: SubmissionStatus::Pending,
        };

        let admitted = self.store.deposits.insert_new(deposit)?;
        self.store.publish()?;
        Ok(admitted)
    }

    /// Submit an expense; it enters the store as Pending without a
    /// transaction id
    pub fn submit_expense(&self, submission: NewExpense) -> LedgerResult<Expense> {
        require("email", &submission.email)?;
        require("title", &submission.title)?;
        require("amount", &submission.amount)?;
        require("payment method", &submission.payment_method)?;
        require("payment method details", &submission.payment_method_details)?;
        self.require_member(&submission.email)?;
        self.require_payment_method(&submission.payment_method)?;

        let expense = Expense {
            id: ExpenseId::new(),
            email: submission.email,
            title: submission.title,
            details: submission.details,
            date: submission.date,
            amount: submission.amount,
            payment_method: submission.payment_method,
            payment_method_details: submission.payment_method_details,
            file_url: submission.file_url,
            status: SubmissionStatus::Pending,
            transaction_id: None,
        };

        let admitted = self.store.expenses.insert_new(expense)?;
        self.store.publish()?;
        Ok(admitted)
    }

    /// Record an external fund; it enters the store as Pending
    pub fn record_received_fund(&self, submission: NewReceivedFund) -> LedgerResult<ReceivedFund> {
        require("email", &submission.email)?;
        require("payer", &submission.payer)?;
        require("title", &submission.title)?;
        require("transaction id", &submission.transaction_id)?;
        require("amount", &submission.amount)?;
        self.require_member(&submission.email)?;
        self.require_payment_method(&submission.payment_method)?;

        let fund = ReceivedFund {
            id: ReceivedFundId::new(),
            date: submission.date,
            payer: submission.payer,
            title: submission.title,
            description: submission.description,
            payment_method: submission.payment_method,
            number: submission.number,
            transaction_id: submission.transaction_id,
            amount: submission.amount,
            status: SubmissionStatus::Pending,
            email: submission.email,
        };

        let admitted = self.store.received_funds.insert_new(fund)?;
        self.store.publish()?;
        Ok(admitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClubPaths;
    use crate::models::PaymentMethod;
    use tempfile::TempDir;

    fn store() -> (TempDir, LedgerStore) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ClubPaths::with_root(temp_dir.path().to_path_buf());
        let store = LedgerStore::new(&paths);
        store.load_all().unwrap();
        store
            .members
            .register(Member::new("Alice", "alice@club.org", "0171", "CSE", "Treasurer"))
            .unwrap();
        store
            .payment_methods
            .insert_new(PaymentMethod::new("bKash", ""))
            .unwrap();
        (temp_dir, store)
    }

    fn new_deposit(trx: &str) -> NewDeposit {
        NewDeposit {
            email: "alice@club.org".into(),
            month: Month::January,
            year: 2024,
            payment_method: "bKash".into(),
            number: "01700000000".into(),
            transaction_id: trx.into(),
            amount: "100".into(),
        }
    }

    #[test]
    fn test_deposit_enters_pending() {
        let (_tmp, store) = store();
        let service = SubmissionService::new(&store);

        let deposit = service.submit_deposit(new_deposit("T1")).unwrap();
        assert_eq!(deposit.status, SubmissionStatus::Pending);
    }

    #[test]
    fn test_unknown_member_refused() {
        let (_tmp, store) = store();
        let service = SubmissionService::new(&store);

        let mut submission = new_deposit("T1");
        submission.email = "stranger@club.org".into();
        let err = service.submit_deposit(submission).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_blank_transaction_id_refused() {
        let (_tmp, store) = store();
        let service = SubmissionService::new(&store);

        let mut submission = new_deposit("");
        submission.transaction_id = "  ".into();
        let err = service.submit_deposit(submission).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_resubmission_same_period_refused() {
        let (_tmp, store) = store();
        let service = SubmissionService::new(&store);

        service.submit_deposit(new_deposit("T1")).unwrap();
        let err = service.submit_deposit(new_deposit("T2")).unwrap_err();
        assert!(err.is_duplicate());
    }

    #[test]
    fn test_advisory_duplicate_checks_over_snapshot() {
        let (_tmp, store) = store();
        let service = SubmissionService::new(&store);
        service.submit_deposit(new_deposit("T1")).unwrap();

        let snapshot = store.snapshot().unwrap();
        assert!(duplicate_deposit_exists(
            &snapshot,
            "alice@club.org",
            Period::new(Month::January, 2024),
            SubmissionStatus::Pending,
        ));
        assert!(!duplicate_deposit_exists(
            &snapshot,
            "alice@club.org",
            Period::new(Month::February, 2024),
            SubmissionStatus::Pending,
        ));
        assert!(duplicate_transaction_exists(
            &snapshot,
            Series::Deposits,
            "T1"
        ));
        assert!(!duplicate_transaction_exists(
            &snapshot,
            Series::Expenses,
            "T1"
        ));
    }
}

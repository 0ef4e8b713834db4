//! Approval workflow: moving submissions out of Pending
//!
//! Every decision names the acting approver, who must be an admin member.
//! Transitions are monotonic; a second decision on the same record is a
//! conflict, never a silent overwrite.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Deposit, DepositId, Expense, ExpenseId, ReceivedFund, ReceivedFundId, SubmissionStatus,
};
use crate::store::LedgerStore;

/// Service applying accept/reject decisions
pub struct ApprovalService<'a> {
    store: &'a LedgerStore,
}

impl<'a> ApprovalService<'a> {
    /// Create an approval service over the given store
    pub fn new(store: &'a LedgerStore) -> Self {
        Self { store }
    }

    fn require_admin(&self, approver_email: &str) -> LedgerResult<()> {
        let member = self
            .store
            .members
            .get_by_email(approver_email)?
            .ok_or_else(|| LedgerError::member_not_found(approver_email.to_string()))?;
        if !member.is_admin {
            return Err(LedgerError::Validation(format!(
                "{} is not an approver",
                approver_email
            )));
        }
        Ok(())
    }

    /// Accept a pending deposit
    pub fn accept_deposit(&self, approver_email: &str, id: DepositId) -> LedgerResult<Deposit> {
        self.require_admin(approver_email)?;
        let deposit = self.store.deposits.set_status(id, SubmissionStatus::Accepted)?;
        self.store.publish()?;
        Ok(deposit)
    }

    /// Reject a pending deposit, freeing its period for resubmission
    pub fn reject_deposit(&self, approver_email: &str, id: DepositId) -> LedgerResult<Deposit> {
        self.require_admin(approver_email)?;
        let deposit = self.store.deposits.set_status(id, SubmissionStatus::Rejected)?;
        self.store.publish()?;
        Ok(deposit)
    }

    /// Accept a pending expense, assigning its transaction id
    pub fn accept_expense(
        &self,
        approver_email: &str,
        id: ExpenseId,
        transaction_id: String,
    ) -> LedgerResult<Expense> {
        self.require_admin(approver_email)?;
        if transaction_id.trim().is_empty() {
            return Err(LedgerError::Validation(
                "transaction id is required to accept an expense".into(),
            ));
        }
        let expense = self.store.expenses.accept(id, transaction_id)?;
        self.store.publish()?;
        Ok(expense)
    }

    /// Reject a pending expense
    pub fn reject_expense(&self, approver_email: &str, id: ExpenseId) -> LedgerResult<Expense> {
        self.require_admin(approver_email)?;
        let expense = self.store.expenses.reject(id)?;
        self.store.publish()?;
        Ok(expense)
    }

    /// Accept a pending received fund
    pub fn accept_received_fund(
        &self,
        approver_email: &str,
        id: ReceivedFundId,
    ) -> LedgerResult<ReceivedFund> {
        self.require_admin(approver_email)?;
        let fund = self
            .store
            .received_funds
            .set_status(id, SubmissionStatus::Accepted)?;
        self.store.publish()?;
        Ok(fund)
    }

    /// Reject a pending received fund
    pub fn reject_received_fund(
        &self,
        approver_email: &str,
        id: ReceivedFundId,
    ) -> LedgerResult<ReceivedFund> {
        self.require_admin(approver_email)?;
        let fund = self
            .store
            .received_funds
            .set_status(id, SubmissionStatus::Rejected)?;
        self.store.publish()?;
        Ok(fund)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClubPaths;
    use crate::models::{Member, Month, PaymentMethod};
    use crate::services::submission::{NewDeposit, SubmissionService};
    use tempfile::TempDir;

    fn store() -> (TempDir, LedgerStore) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ClubPaths::with_root(temp_dir.path().to_path_buf());
        let store = LedgerStore::new(&paths);
        store.load_all().unwrap();

        let mut admin = Member::new("Alice", "alice@club.org", "0171", "CSE", "Treasurer");
        admin.is_admin = true;
        store.members.register(admin).unwrap();
        store
            .members
            .register(Member::new("Bob", "bob@club.org", "0172", "CSE", "Member"))
            .unwrap();
        store
            .payment_methods
            .insert_new(PaymentMethod::new("bKash", ""))
            .unwrap();
        (temp_dir, store)
    }

    fn pending_deposit(store: &LedgerStore) -> Deposit {
        SubmissionService::new(store)
            .submit_deposit(NewDeposit {
                email: "bob@club.org".into(),
                month: Month::January,
                year: 2024,
                payment_method: "bKash".into(),
                number: "01800000000".into(),
                transaction_id: "T1".into(),
                amount: "100".into(),
            })
            .unwrap()
    }

    #[test]
    fn test_accept_requires_admin() {
        let (_tmp, store) = store();
        let deposit = pending_deposit(&store);
        let service = ApprovalService::new(&store);

        let err = service
            .accept_deposit("bob@club.org", deposit.id)
            .unwrap_err();
        assert!(err.is_validation());

        let accepted = service
            .accept_deposit("alice@club.org", deposit.id)
            .unwrap();
        assert_eq!(accepted.status, SubmissionStatus::Accepted);
    }

    #[test]
    fn test_second_decision_conflicts() {
        let (_tmp, store) = store();
        let deposit = pending_deposit(&store);
        let service = ApprovalService::new(&store);

        service
            .reject_deposit("alice@club.org", deposit.id)
            .unwrap();
        let err = service
            .accept_deposit("alice@club.org", deposit.id)
            .unwrap_err();
        assert!(matches!(err, LedgerError::Conflict(_)));
    }

    #[test]
    fn test_accept_expense_requires_transaction_id() {
        let (_tmp, store) = store();
        let service = ApprovalService::new(&store);

        let expense = SubmissionService::new(&store)
            .submit_expense(crate::services::submission::NewExpense {
                email: "bob@club.org".into(),
                title: "Banner".into(),
                details: String::new(),
                date: chrono::NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
                amount: "200".into(),
                payment_method: "bKash".into(),
                payment_method_details: "Refund to 01800000000".into(),
                file_url: String::new(),
            })
            .unwrap();

        let err = service
            .accept_expense("alice@club.org", expense.id, "  ".into())
            .unwrap_err();
        assert!(err.is_validation());

        let accepted = service
            .accept_expense("alice@club.org", expense.id, "E-1".into())
            .unwrap();
        assert_eq!(accepted.transaction_id.as_deref(), Some("E-1"));
    }
}

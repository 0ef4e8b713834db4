//! Expense repository
//!
//! Expenses arrive without a transaction id; the approver assigns one on
//! acceptance. Transaction-id uniqueness is checked under the same write
//! lock as the acceptance, against accepted expenses only.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, ExpenseId, SubmissionStatus};

use super::file_io::{read_json, write_json_atomic};

/// Serializable expense data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

#[derive(Debug, Default)]
struct ExpenseTable {
    rows: HashMap<ExpenseId, Expense>,
    /// Index: assigned transaction id -> expense id
    by_transaction: HashMap<String, ExpenseId>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    table: RwLock<ExpenseTable>,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            table: RwLock::new(ExpenseTable::default()),
        }
    }

    fn read_table(&self) -> LedgerResult<std::sync::RwLockReadGuard<'_, ExpenseTable>> {
        self.table
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_table(&self) -> LedgerResult<std::sync::RwLockWriteGuard<'_, ExpenseTable>> {
        self.table
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load expenses from disk and rebuild the transaction index
    pub fn load(&self) -> LedgerResult<()> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut table = self.write_table()?;
        *table = ExpenseTable::default();
        for expense in file_data.expenses {
            if let Some(trx) = &expense.transaction_id {
                table.by_transaction.insert(trx.clone(), expense.id);
            }
            table.rows.insert(expense.id, expense);
        }
        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> LedgerResult<()> {
        let table = self.read_table()?;
        let mut expenses: Vec<_> = table.rows.values().cloned().collect();
        expenses.sort_by(|a, b| a.date.cmp(&b.date).then(a.email.cmp(&b.email)));
        write_json_atomic(&self.path, &ExpenseData { expenses })
    }

    /// Admit a new expense submission
    pub fn insert_new(&self, expense: Expense) -> LedgerResult<Expense> {
        if expense.status != SubmissionStatus::Pending {
            return Err(LedgerError::Validation(
                "a new expense must be submitted as Pending".into(),
            ));
        }
        if expense.transaction_id.is_some() {
            return Err(LedgerError::Validation(
                "a new expense must not carry a transaction id".into(),
            ));
        }

        let mut table = self.write_table()?;
        table.rows.insert(expense.id, expense.clone());
        Ok(expense)
    }

    /// Accept a pending expense and assign its transaction id
    ///
    /// The id must be unused among expenses; a duplicate leaves the record
    /// Pending and its transaction id unset.
    pub fn accept(&self, id: ExpenseId, transaction_id: String) -> LedgerResult<Expense> {
        let mut table = self.write_table()?;

        let current = table
            .rows
            .get(&id)
            .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))?;
        if current.status.is_terminal() {
            return Err(LedgerError::Conflict(format!(
                "expense {} is already {}",
                id, current.status
            )));
        }
        if table.by_transaction.contains_key(&transaction_id) {
            return Err(LedgerError::transaction_already_recorded());
        }

        table.by_transaction.insert(transaction_id.clone(), id);
        let expense = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))?;
        expense.status = SubmissionStatus::Accepted;
        expense.transaction_id = Some(transaction_id);
        Ok(expense.clone())
    }

    /// Reject a pending expense
    pub fn reject(&self, id: ExpenseId) -> LedgerResult<Expense> {
        let mut table = self.write_table()?;

        let expense = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))?;
        if expense.status.is_terminal() {
            return Err(LedgerError::Conflict(format!(
                "expense {} is already {}",
                id, expense.status
            )));
        }

        expense.status = SubmissionStatus::Rejected;
        Ok(expense.clone())
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> LedgerResult<Option<Expense>> {
        Ok(self.read_table()?.rows.get(&id).cloned())
    }

    /// Get all expenses, ordered by date then member email
    pub fn get_all(&self) -> LedgerResult<Vec<Expense>> {
        let table = self.read_table()?;
        let mut expenses: Vec<_> = table.rows.values().cloned().collect();
        expenses.sort_by(|a, b| a.date.cmp(&b.date).then(a.email.cmp(&b.email)));
        Ok(expenses)
    }

    /// Get expenses with the given status
    pub fn get_by_status(&self, status: SubmissionStatus) -> LedgerResult<Vec<Expense>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|e| e.status == status)
            .collect())
    }

    /// Count expenses
    pub fn count(&self) -> LedgerResult<usize> {
        Ok(self.read_table()?.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    fn expense(email: &str, title: &str) -> Expense {
        Expense {
            id: ExpenseId::new(),
            email: email.into(),
            title: title.into(),
            details: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            amount: "200".into(),
            payment_method: "bKash".into(),
            payment_method_details: "Refund to 01800000000".into(),
            file_url: String::new(),
            status: SubmissionStatus::Pending,
            transaction_id: None,
        }
    }

    #[test]
    fn test_accept_assigns_transaction_id() {
        let (_tmp, repo) = repo();
        let e = repo.insert_new(expense("bob@club.org", "Banner")).unwrap();

        let accepted = repo.accept(e.id, "T-900".into()).unwrap();
        assert_eq!(accepted.status, SubmissionStatus::Accepted);
        assert_eq!(accepted.transaction_id.as_deref(), Some("T-900"));
    }

    #[test]
    fn test_accept_with_taken_transaction_id_leaves_record_pending() {
        let (_tmp, repo) = repo();
        let a = repo.insert_new(expense("bob@club.org", "Banner")).unwrap();
        let b = repo.insert_new(expense("carol@club.org", "Venue")).unwrap();

        repo.accept(a.id, "T-900".into()).unwrap();
        let err = repo.accept(b.id, "T-900".into()).unwrap_err();
        assert!(err.is_duplicate());

        let untouched = repo.get(b.id).unwrap().unwrap();
        assert_eq!(untouched.status, SubmissionStatus::Pending);
        assert_eq!(untouched.transaction_id, None);
    }

    #[test]
    fn test_reject_is_terminal() {
        let (_tmp, repo) = repo();
        let e = repo.insert_new(expense("bob@club.org", "Banner")).unwrap();

        repo.reject(e.id).unwrap();
        let err = repo.accept(e.id, "T-901".into()).unwrap_err();
        assert!(matches!(err, LedgerError::Conflict(_)));
    }

    #[test]
    fn test_new_expense_must_be_pending_without_trx() {
        let (_tmp, repo) = repo();
        let mut e = expense("bob@club.org", "Banner");
        e.transaction_id = Some("T-1".into());
        assert!(repo.insert_new(e).is_err());
    }
}

//! Deposit repository for the JSON store adapter
//!
//! Holds the dues series and enforces the two write-time invariants:
//! at most one non-rejected deposit per (member, period), and transaction-id
//! uniqueness across all deposits. Both checks run under the same write lock
//! as the insert, so check-then-admit is one atomic operation and the
//! read-then-write race cannot admit a duplicate through this adapter.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Deposit, DepositId, Period, SubmissionStatus};

use super::file_io::{read_json, write_json_atomic};

/// Serializable deposit data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct DepositData {
    deposits: Vec<Deposit>,
}

/// In-memory table guarded by a single lock so conditional inserts are atomic
#[derive(Debug, Default)]
struct DepositTable {
    rows: HashMap<DepositId, Deposit>,
    /// Index: (member email, period) -> deposit ids
    by_member_period: HashMap<(String, Period), Vec<DepositId>>,
    /// Index: transaction id -> deposit id
    by_transaction: HashMap<String, DepositId>,
}

impl DepositTable {
    fn index(&mut self, deposit: &Deposit) {
        self.by_member_period
            .entry((deposit.email.clone(), deposit.period()))
            .or_default()
            .push(deposit.id);
        self.by_transaction
            .insert(deposit.transaction_id.clone(), deposit.id);
    }
}

/// Repository for deposit persistence with dedup and transaction-id indexes
pub struct DepositRepository {
    path: PathBuf,
    table: RwLock<DepositTable>,
}

impl DepositRepository {
    /// Create a new deposit repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            table: RwLock::new(DepositTable::default()),
        }
    }

    fn read_table(&self) -> LedgerResult<std::sync::RwLockReadGuard<'_, DepositTable>> {
        self.table
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_table(&self) -> LedgerResult<std::sync::RwLockWriteGuard<'_, DepositTable>> {
        self.table
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load deposits from disk and rebuild indexes
    pub fn load(&self) -> LedgerResult<()> {
        let file_data: DepositData = read_json(&self.path)?;

        let mut table = self.write_table()?;
        *table = DepositTable::default();
        for deposit in file_data.deposits {
            table.index(&deposit);
            table.rows.insert(deposit.id, deposit);
        }
        Ok(())
    }

    /// Save deposits to disk
    pub fn save(&self) -> LedgerResult<()> {
        let table = self.read_table()?;
        let mut deposits: Vec<_> = table.rows.values().cloned().collect();
        deposits.sort_by(|a, b| a.period().cmp(&b.period()).then(a.email.cmp(&b.email)));
        write_json_atomic(&self.path, &DepositData { deposits })
    }

    /// Admit a new deposit, or refuse it without changing the store
    ///
    /// Refuses with a [`LedgerError::Duplicate`] when the member already has
    /// a Pending or Accepted deposit for the same period, or when the
    /// transaction id is already recorded on any deposit. New deposits must
    /// arrive Pending.
    pub fn insert_new(&self, deposit: Deposit) -> LedgerResult<Deposit> {
        if deposit.status != SubmissionStatus::Pending {
            return Err(LedgerError::Validation(
                "a new deposit must be submitted as Pending".into(),
            ));
        }

        let mut table = self.write_table()?;

        let period_key = (deposit.email.clone(), deposit.period());
        if let Some(ids) = table.by_member_period.get(&period_key) {
            let settled = ids.iter().any(|id| {
                table
                    .rows
                    .get(id)
                    .map(|d| d.status != SubmissionStatus::Rejected)
                    .unwrap_or(false)
            });
            if settled {
                return Err(LedgerError::period_already_recorded());
            }
        }

        if table.by_transaction.contains_key(&deposit.transaction_id) {
            return Err(LedgerError::transaction_already_recorded());
        }

        table.index(&deposit);
        table.rows.insert(deposit.id, deposit.clone());
        Ok(deposit)
    }

    /// Transition a deposit out of Pending
    ///
    /// A deposit already in a terminal state is refused with a
    /// [`LedgerError::Conflict`]; the attempt is never silently ignored.
    pub fn set_status(&self, id: DepositId, status: SubmissionStatus) -> LedgerResult<Deposit> {
        let mut table = self.write_table()?;

        let deposit = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| LedgerError::deposit_not_found(id.to_string()))?;

        if deposit.status.is_terminal() {
            return Err(LedgerError::Conflict(format!(
                "deposit {} is already {}",
                id, deposit.status
            )));
        }

        deposit.status = status;
        Ok(deposit.clone())
    }

    /// Get a deposit by ID
    pub fn get(&self, id: DepositId) -> LedgerResult<Option<Deposit>> {
        Ok(self.read_table()?.rows.get(&id).cloned())
    }

    /// Get all deposits, ordered by period then member email
    pub fn get_all(&self) -> LedgerResult<Vec<Deposit>> {
        let table = self.read_table()?;
        let mut deposits: Vec<_> = table.rows.values().cloned().collect();
        deposits.sort_by(|a, b| a.period().cmp(&b.period()).then(a.email.cmp(&b.email)));
        Ok(deposits)
    }

    /// Get deposits with the given status
    pub fn get_by_status(&self, status: SubmissionStatus) -> LedgerResult<Vec<Deposit>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|d| d.status == status)
            .collect())
    }

    /// Get a member's deposits
    pub fn get_by_email(&self, email: &str) -> LedgerResult<Vec<Deposit>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|d| d.email == email)
            .collect())
    }

    /// Count deposits
    pub fn count(&self) -> LedgerResult<usize> {
        Ok(self.read_table()?.rows.len())
    }
}

//! Received fund repository
//!
//! External money follows the same Pending/Accepted/Rejected workflow as
//! deposits but carries no per-member dedup rule: one sponsor may send any
//! number of funds in a period.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{ReceivedFund, ReceivedFundId, SubmissionStatus};

use super::file_io::{read_json, write_json_atomic};

/// Serializable received fund data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ReceivedFundData {
    received_funds: Vec<ReceivedFund>,
}

/// Repository for externally received funds
pub struct ReceivedFundRepository {
    path: PathBuf,
    funds: RwLock<HashMap<ReceivedFundId, ReceivedFund>>,
}

impl ReceivedFundRepository {
    /// Create a new received fund repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            funds: RwLock::new(HashMap::new()),
        }
    }

    fn read_map(
        &self,
    ) -> LedgerResult<std::sync::RwLockReadGuard<'_, HashMap<ReceivedFundId, ReceivedFund>>> {
        self.funds
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_map(
        &self,
    ) -> LedgerResult<std::sync::RwLockWriteGuard<'_, HashMap<ReceivedFundId, ReceivedFund>>>
    {
        self.funds
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load received funds from disk
    pub fn load(&self) -> LedgerResult<()> {
        let file_data: ReceivedFundData = read_json(&self.path)?;

        let mut map = self.write_map()?;
        map.clear();
        for fund in file_data.received_funds {
            map.insert(fund.id, fund);
        }
        Ok(())
    }

    /// Save received funds to disk
    pub fn save(&self) -> LedgerResult<()> {
        let map = self.read_map()?;
        let mut received_funds: Vec<_> = map.values().cloned().collect();
        received_funds.sort_by(|a, b| a.date.cmp(&b.date).then(a.payer.cmp(&b.payer)));
        write_json_atomic(&self.path, &ReceivedFundData { received_funds })
    }

    /// Record a new received fund
    pub fn insert_new(&self, fund: ReceivedFund) -> LedgerResult<ReceivedFund> {
        if fund.status != SubmissionStatus::Pending {
            return Err(LedgerError::Validation(
                "a new received fund must be recorded as Pending".into(),
            ));
        }
        let mut map = self.write_map()?;
        map.insert(fund.id, fund.clone());
        Ok(fund)
    }

    /// Transition a received fund out of Pending
    pub fn set_status(
        &self,
        id: ReceivedFundId,
        status: SubmissionStatus,
    ) -> LedgerResult<ReceivedFund> {
        let mut map = self.write_map()?;

        let fund = map
            .get_mut(&id)
            .ok_or_else(|| LedgerError::received_fund_not_found(id.to_string()))?;
        if fund.status.is_terminal() {
            return Err(LedgerError::Conflict(format!(
                "received fund {} is already {}",
                id, fund.status
            )));
        }

        fund.status = status;
        Ok(fund.clone())
    }

    /// Get a received fund by ID
    pub fn get(&self, id: ReceivedFundId) -> LedgerResult<Option<ReceivedFund>> {
        Ok(self.read_map()?.get(&id).cloned())
    }

    /// Get all received funds, ordered by date then payer
    pub fn get_all(&self) -> LedgerResult<Vec<ReceivedFund>> {
        let map = self.read_map()?;
        let mut funds: Vec<_> = map.values().cloned().collect();
        funds.sort_by(|a, b| a.date.cmp(&b.date).then(a.payer.cmp(&b.payer)));
        Ok(funds)
    }
}

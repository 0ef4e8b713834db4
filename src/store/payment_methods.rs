//! Payment method repository
//!
//! A small reference collection; method names are unique because they are
//! the value stored on submissions.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{PaymentMethod, PaymentMethodId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable payment method data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PaymentMethodData {
    payment_methods: Vec<PaymentMethod>,
}

/// Repository for payment methods
pub struct PaymentMethodRepository {
    path: PathBuf,
    methods: RwLock<HashMap<PaymentMethodId, PaymentMethod>>,
}

impl PaymentMethodRepository {
    /// Create a new payment method repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            methods: RwLock::new(HashMap::new()),
        }
    }

    fn read_map(
        &self,
    ) -> LedgerResult<std::sync::RwLockReadGuard<'_, HashMap<PaymentMethodId, PaymentMethod>>> {
        self.methods
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_map(
        &self,
    ) -> LedgerResult<std::sync::RwLockWriteGuard<'_, HashMap<PaymentMethodId, PaymentMethod>>>
    {
        self.methods
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load payment methods from disk
    pub fn load(&self) -> LedgerResult<()> {
        let file_data: PaymentMethodData = read_json(&self.path)?;

        let mut map = self.write_map()?;
        map.clear();
        for method in file_data.payment_methods {
            map.insert(method.id, method);
        }
        Ok(())
    }

    /// Save payment methods to disk
    pub fn save(&self) -> LedgerResult<()> {
        let map = self.read_map()?;
        let mut payment_methods: Vec<_> = map.values().cloned().collect();
        payment_methods.sort_by(|a, b| a.name.cmp(&b.name));
        write_json_atomic(&self.path, &PaymentMethodData { payment_methods })
    }

    /// Insert a new payment method; names are unique
    pub fn insert_new(&self, method: PaymentMethod) -> LedgerResult<PaymentMethod> {
        let mut map = self.write_map()?;
        if map.values().any(|m| m.name == method.name) {
            return Err(LedgerError::Duplicate(format!(
                "payment method {} already exists",
                method.name
            )));
        }
        map.insert(method.id, method.clone());
        Ok(method)
    }

    /// Get a payment method by name
    pub fn get_by_name(&self, name: &str) -> LedgerResult<Option<PaymentMethod>> {
        Ok(self.read_map()?.values().find(|m| m.name == name).cloned())
    }

    /// Get all payment methods, ordered by name
    pub fn get_all(&self) -> LedgerResult<Vec<PaymentMethod>> {
        let map = self.read_map()?;
        let mut methods: Vec<_> = map.values().cloned().collect();
        methods.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(methods)
    }
}

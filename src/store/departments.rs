//! Department repository
//!
//! Departments own their positions, each carrying an integer hierarchy used
//! for roster ordering. Department names are unique.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Department, DepartmentId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable department data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct DepartmentData {
    departments: Vec<Department>,
}

/// Repository for departments and their positions
pub struct DepartmentRepository {
    path: PathBuf,
    departments: RwLock<HashMap<DepartmentId, Department>>,
}

impl DepartmentRepository {
    /// Create a new department repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            departments: RwLock::new(HashMap::new()),
        }
    }

    fn read_map(
        &self,
    ) -> LedgerResult<std::sync::RwLockReadGuard<'_, HashMap<DepartmentId, Department>>> {
        self.departments
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_map(
        &self,
    ) -> LedgerResult<std::sync::RwLockWriteGuard<'_, HashMap<DepartmentId, Department>>> {
        self.departments
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load departments from disk
    pub fn load(&self) -> LedgerResult<()> {
        let file_data: DepartmentData = read_json(&self.path)?;

        let mut map = self.write_map()?;
        map.clear();
        for department in file_data.departments {
            map.insert(department.id, department);
        }
        Ok(())
    }

    /// Save departments to disk
    pub fn save(&self) -> LedgerResult<()> {
        let map = self.read_map()?;
        let mut departments: Vec<_> = map.values().cloned().collect();
        departments.sort_by(|a, b| a.name.cmp(&b.name));
        write_json_atomic(&self.path, &DepartmentData { departments })
    }

    /// Insert a new department; department names are unique
    pub fn insert_new(&self, department: Department) -> LedgerResult<Department> {
        let mut map = self.write_map()?;
        if map.values().any(|d| d.name == department.name) {
            return Err(LedgerError::Duplicate(format!(
                "department {} already exists",
                department.name
            )));
        }
        map.insert(department.id, department.clone());
        Ok(department)
    }

    /// Replace an existing department (positions included)
    pub fn update(&self, department: Department) -> LedgerResult<Department> {
        let mut map = self.write_map()?;
        if !map.contains_key(&department.id) {
            return Err(LedgerError::department_not_found(department.name.clone()));
        }
        map.insert(department.id, department.clone());
        Ok(department)
    }

    /// Get a department by name
    pub fn get_by_name(&self, name: &str) -> LedgerResult<Option<Department>> {
        Ok(self.read_map()?.values().find(|d| d.name == name).cloned())
    }

    /// Get all departments, ordered by name
    pub fn get_all(&self) -> LedgerResult<Vec<Department>> {
        let map = self.read_map()?;
        let mut departments: Vec<_> = map.values().cloned().collect();
        departments.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(departments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;
    use tempfile::TempDir;

    fn repo() -> (TempDir, DepartmentRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = DepartmentRepository::new(temp_dir.path().join("departments.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    #[test]
    fn test_insert_and_lookup_by_name() {
        let (_tmp, repo) = repo();
        let mut dept = Department::new("CSE");
        dept.positions.push(Position::new("Treasurer", 1));
        repo.insert_new(dept).unwrap();

        let found = repo.get_by_name("CSE").unwrap().unwrap();
        assert_eq!(found.positions.len(), 1);
    }

    #[test]
    fn test_duplicate_name_refused() {
        let (_tmp, repo) = repo();
        repo.insert_new(Department::new("CSE")).unwrap();
        let err = repo.insert_new(Department::new("CSE")).unwrap_err();
        assert!(err.is_duplicate());
    }
}

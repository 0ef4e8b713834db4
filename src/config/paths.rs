//! Data directory and file path resolution

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{LedgerError, LedgerResult};

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "CLUB_LEDGER_DATA_DIR";

/// Resolved locations of the ledger's data files
#[derive(Debug, Clone)]
pub struct ClubPaths {
    data_dir: PathBuf,
}

impl ClubPaths {
    /// Resolve paths from the environment or the platform data directory
    pub fn resolve() -> LedgerResult<Self> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            return Ok(Self {
                data_dir: PathBuf::from(dir),
            });
        }

        let project_dirs = ProjectDirs::from("org", "club-ledger", "club-ledger")
            .ok_or_else(|| LedgerError::Config("Could not determine data directory".into()))?;

        Ok(Self {
            data_dir: project_dirs.data_dir().to_path_buf(),
        })
    }

    /// Use an explicit root, bypassing resolution
    pub fn with_root(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// The data directory root
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Create the data directory if it doesn't exist
    pub fn ensure_directories(&self) -> LedgerResult<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    /// Settings file path
    pub fn settings_file(&self) -> PathBuf {
        self.data_dir.join("settings.json")
    }

    /// Member roster file path
    pub fn members_file(&self) -> PathBuf {
        self.data_dir.join("members.json")
    }

    /// Departments file path
    pub fn departments_file(&self) -> PathBuf {
        self.data_dir.join("departments.json")
    }

    /// Payment methods file path
    pub fn payment_methods_file(&self) -> PathBuf {
        self.data_dir.join("payment_methods.json")
    }

    /// Deposits file path
    pub fn deposits_file(&self) -> PathBuf {
        self.data_dir.join("deposits.json")
    }

    /// Expenses file path
    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir.join("expenses.json")
    }

    /// Received funds file path
    pub fn received_funds_file(&self) -> PathBuf {
        self.data_dir.join("received_funds.json")
    }

    /// Events file path
    pub fn events_file(&self) -> PathBuf {
        self.data_dir.join("events.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_with_root_places_files_under_root() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ClubPaths::with_root(temp_dir.path().to_path_buf());

        assert!(paths.deposits_file().starts_with(temp_dir.path()));
        assert_eq!(
            paths.deposits_file().file_name().unwrap(),
            "deposits.json"
        );
    }

    #[test]
    fn test_ensure_directories_creates_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("nested").join("data");
        let paths = ClubPaths::with_root(root.clone());

        paths.ensure_directories().unwrap();
        assert!(root.is_dir());
    }
}

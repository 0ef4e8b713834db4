//! Application settings
//!
//! Settings are persisted alongside the data files and created with
//! defaults on first run.

use serde::{Deserialize, Serialize};

use crate::error::LedgerResult;
use crate::services::defaulters::DefaulterPolicy;
use crate::store::file_io::{read_json, write_json_atomic};

use super::paths::ClubPaths;

/// Current settings schema version
pub const SETTINGS_VERSION: u32 = 1;

fn default_version() -> u32 {
    SETTINGS_VERSION
}

fn default_deposit_page_size() -> usize {
    20
}

fn default_expense_page_size() -> usize {
    10
}

fn default_mailer_name() -> String {
    "Club Treasury".to_string()
}

fn default_currency_symbol() -> String {
    "BDT".to_string()
}

/// Persisted application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Settings schema version
    #[serde(default = "default_version")]
    pub schema_version: u32,

    /// Rows per page in the deposit register
    #[serde(default = "default_deposit_page_size")]
    pub deposit_page_size: usize,

    /// Rows per page in the expense register
    #[serde(default = "default_expense_page_size")]
    pub expense_page_size: usize,

    /// Which deposits count as having paid when detecting defaulters
    #[serde(default)]
    pub defaulter_policy: DefaulterPolicy,

    /// Sender name used on defaulter notifications
    #[serde(default = "default_mailer_name")]
    pub mailer_name: String,

    /// Currency label shown in reports
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: SETTINGS_VERSION,
            deposit_page_size: default_deposit_page_size(),
            expense_page_size: default_expense_page_size(),
            defaulter_policy: DefaulterPolicy::default(),
            mailer_name: default_mailer_name(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl Settings {
    /// Load settings, creating the file with defaults if it doesn't exist
    pub fn load_or_create(paths: &ClubPaths) -> LedgerResult<Self> {
        let path = paths.settings_file();
        if !path.exists() {
            let settings = Self::default();
            settings.save(paths)?;
            return Ok(settings);
        }

        // Missing fields fall back to their serde defaults
        read_json(&path)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ClubPaths) -> LedgerResult<()> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_first_run_creates_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ClubPaths::with_root(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.deposit_page_size, 20);
        assert_eq!(settings.expense_page_size, 10);
        assert!(paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ClubPaths::with_root(temp_dir.path().to_path_buf());

        let mut settings = Settings::load_or_create(&paths).unwrap();
        settings.currency_symbol = "USD".into();
        settings.save(&paths).unwrap();

        let reloaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(reloaded.currency_symbol, "USD");
    }
}

//! club-ledger - Membership dues reconciliation and reporting engine
//!
//! This library keeps a club treasury's books: member dues deposits,
//! reimbursable expenses, and externally received funds, each flowing
//! through a Pending/Accepted/Rejected approval workflow. On top of the
//! stored series it computes per-period and per-method summaries, cash in
//! hand, and defaulter lists, and shapes display-ready report rows.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data paths and persisted settings
//! - `error`: Custom error types
//! - `models`: Core data models (members, deposits, expenses, etc.)
//! - `store`: JSON file store with conditional writes and snapshots
//! - `services`: Business logic (submission, approval, aggregation,
//!   defaulters, notification)
//! - `reports`: Register shaping, pagination, and CSV export
//!
//! # Example
//!
//! ```rust,ignore
//! use club_ledger::config::{ClubPaths, Settings};
//! use club_ledger::store::LedgerStore;
//!
//! let paths = ClubPaths::resolve()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = LedgerStore::new(&paths);
//! store.load_all()?;
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod store;

pub use error::{LedgerError, LedgerResult};

//! Report shaping and export
//!
//! Registers are flat, display-ready rows joined against the roster;
//! pagination and CSV export operate on those rows. All shaping is pure
//! over a snapshot.

pub mod export;
pub mod paginate;
pub mod register;

pub use export::{write_deposit_register_csv, write_expense_register_csv, write_summary_csv};
pub use paginate::{paginate, Page};
pub use register::{
    deposit_register, expense_register, DepositRow, ExpenseRow, DEPOSIT_COLUMNS, EXPENSE_COLUMNS,
};

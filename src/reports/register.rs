//! Register rows: flat, display-ready views of the ledger series
//!
//! Rows join each record to the roster by email. A record whose submitter
//! has left the roster stays in the register; the email stands in for the
//! missing name so the row remains identifiable.

use crate::models::SubmissionStatus;
use crate::store::LedgerSnapshot;

/// Column headers of the deposit register
pub const DEPOSIT_COLUMNS: [&str; 10] = [
    "Name",
    "Position",
    "Department",
    "Month",
    "Year",
    "Payment Method",
    "Number",
    "Transaction ID",
    "Amount",
    "Status",
];

/// Column headers of the expense register
pub const EXPENSE_COLUMNS: [&str; 10] = [
    "Name",
    "Department",
    "Title",
    "Date",
    "Payment Method",
    "Reimbursement Details",
    "Transaction ID",
    "Amount",
    "Receipt",
    "Status",
];

/// One display-ready row of the deposit register
#[derive(Debug, Clone, PartialEq)]
pub struct DepositRow {
    pub name: String,
    pub position: String,
    pub department: String,
    pub month: String,
    pub year: String,
    pub payment_method: String,
    pub number: String,
    pub transaction_id: String,
    pub amount: String,
    pub status: String,
}

impl DepositRow {
    /// The row's cells in [`DEPOSIT_COLUMNS`] order
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.position.clone(),
            self.department.clone(),
            self.month.clone(),
            self.year.clone(),
            self.payment_method.clone(),
            self.number.clone(),
            self.transaction_id.clone(),
            self.amount.clone(),
            self.status.clone(),
        ]
    }
}

/// One display-ready row of the expense register
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRow {
    pub name: String,
    pub department: String,
    pub title: String,
    pub date: String,
    pub payment_method: String,
    pub payment_method_details: String,
    pub transaction_id: String,
    pub amount: String,
    pub file_url: String,
    pub status: String,
}

impl ExpenseRow {
    /// The row's cells in [`EXPENSE_COLUMNS`] order
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.department.clone(),
            self.title.clone(),
            self.date.clone(),
            self.payment_method.clone(),
            self.payment_method_details.clone(),
            self.transaction_id.clone(),
            self.amount.clone(),
            self.file_url.clone(),
            self.status.clone(),
        ]
    }
}

/// Shape the deposit register, optionally restricted to one status
///
/// Rows keep the store's ordering: period, then member email.
pub fn deposit_register(
    snapshot: &LedgerSnapshot,
    status: Option<SubmissionStatus>,
) -> Vec<DepositRow> {
    snapshot
        .deposits
        .iter()
        .filter(|d| status.map_or(true, |s| d.status == s))
        .map(|d| {
            let member = snapshot.member_by_email(&d.email);
            DepositRow {
                name: member.map_or(d.email.clone(), |m| m.name.clone()),
                position: member.map_or(String::new(), |m| m.position.clone()),
                department: member.map_or(String::new(), |m| m.department.clone()),
                month: d.month.name().to_string(),
                year: d.year.to_string(),
                payment_method: d.payment_method.clone(),
                number: d.number.clone(),
                transaction_id: d.transaction_id.clone(),
                amount: d.amount.clone(),
                status: d.status.to_string(),
            }
        })
        .collect()
}

/// Shape the expense register, optionally restricted to one status
pub fn expense_register(
    snapshot: &LedgerSnapshot,
    status: Option<SubmissionStatus>,
) -> Vec<ExpenseRow> {
    snapshot
        .expenses
        .iter()
        .filter(|e| status.map_or(true, |s| e.status == s))
        .map(|e| {
            let member = snapshot.member_by_email(&e.email);
            ExpenseRow {
                name: member.map_or(e.email.clone(), |m| m.name.clone()),
                department: member.map_or(String::new(), |m| m.department.clone()),
                title: e.title.clone(),
                date: e.date.to_string(),
                payment_method: e.payment_method.clone(),
                payment_method_details: e.payment_method_details.clone(),
                transaction_id: e.transaction_id.clone().unwrap_or_default(),
                amount: e.amount.clone(),
                file_url: e.file_url.clone(),
                status: e.status.to_string(),
            }
        })
        .collect()
}

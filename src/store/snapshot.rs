//! Immutable point-in-time view of the ledger
//!
//! Aggregation, defaulter detection, and report shaping are pure functions
//! over a [`LedgerSnapshot`]; they never read the live store. A snapshot is
//! an owned value, so holding one never blocks a writer.

use crate::models::{Deposit, Department, Event, EventType, Expense, Member, PaymentMethod, ReceivedFund};

/// Owned copy of every collection at one instant
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    pub members: Vec<Member>,
    pub departments: Vec<Department>,
    pub payment_methods: Vec<PaymentMethod>,
    pub deposits: Vec<Deposit>,
    pub expenses: Vec<Expense>,
    pub received_funds: Vec<ReceivedFund>,
    pub event_types: Vec<EventType>,
    pub events: Vec<Event>,
}

impl LedgerSnapshot {
    /// Look up a member by email
    pub fn member_by_email(&self, email: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.email == email)
    }

    /// Look up a department by name
    pub fn department_by_name(&self, name: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.name == name)
    }
}

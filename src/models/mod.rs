//! Core data models for club-ledger
//!
//! This module contains all the data structures that represent the club
//! treasury domain: members, departments, payment methods, deposits,
//! expenses, received funds, and scheduling entities.

pub mod department;
pub mod deposit;
pub mod event;
pub mod expense;
pub mod ids;
pub mod member;
pub mod payment_method;
pub mod period;
pub mod received_fund;

pub use department::{Department, Position, UNKNOWN_HIERARCHY};
pub use deposit::{DedupKey, Deposit, SubmissionStatus};
pub use event::{Event, EventType};
pub use expense::Expense;
pub use ids::{
    DepartmentId, DepositId, EventId, EventTypeId, ExpenseId, MemberId, PaymentMethodId,
    PositionId, ReceivedFundId,
};
pub use member::Member;
pub use payment_method::PaymentMethod;
pub use period::{Month, Period};
pub use received_fund::ReceivedFund;

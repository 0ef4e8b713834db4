//! Business logic services
//!
//! Writers ([`SubmissionService`], [`ApprovalService`]) go through the
//! store's conditional writes. Readers (aggregation, defaulters, the
//! directory) are pure functions over a [`crate::store::LedgerSnapshot`].

pub mod aggregation;
pub mod approval;
pub mod defaulters;
pub mod directory;
pub mod notify;
pub mod submission;

pub use aggregation::{
    cash_in_hand, holdings, monthly_deposit_summary, monthly_expense_summary,
    monthly_received_summary, Holdings, MalformedAmount, MonthlySummary, PeriodFilter,
    PeriodTotals, SummaryColumn,
};
pub use approval::ApprovalService;
pub use defaulters::{defaulters_by_period, defaulters_for, DefaulterPolicy};
pub use directory::Directory;
pub use notify::{DefaulterNotifier, MailDispatcher, MailMessage, NotificationOutcome};
pub use submission::{
    duplicate_deposit_exists, duplicate_transaction_exists, NewDeposit, NewExpense,
    NewReceivedFund, Series, SubmissionService,
};

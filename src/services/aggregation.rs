//! Financial aggregation over a ledger snapshot
//!
//! Amounts live in storage as text and are parsed here. A value that does
//! not parse is excluded from every total and reported in the summary's
//! `malformed` list; it is never coerced to zero, so a typo shrinks a total
//! visibly instead of silently.
//!
//! Only Accepted records count. Pending money is not the club's yet and
//! rejected money never was.

use std::collections::BTreeMap;

use crate::models::{Month, Period, SubmissionStatus};
use crate::store::LedgerSnapshot;

/// Restrict a summary to matching periods
///
/// `None` on a field means "any". Month and year filter independently, so
/// `{ month: Some(January), year: None }` selects January of every year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodFilter {
    pub month: Option<Month>,
    pub year: Option<i32>,
}

impl PeriodFilter {
    /// Match every period
    pub const ALL: PeriodFilter = PeriodFilter {
        month: None,
        year: None,
    };

    /// Filter to exactly one period
    pub fn for_period(period: Period) -> Self {
        Self {
            month: Some(period.month),
            year: Some(period.year),
        }
    }

    fn matches(&self, period: Period) -> bool {
        self.month.map_or(true, |m| m == period.month)
            && self.year.map_or(true, |y| y == period.year)
    }
}

/// A column of the summary grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryColumn {
    /// One payment method's column
    Method(String),
    /// The per-period total column
    Total,
}

/// An amount that failed to parse, excluded from totals
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedAmount {
    /// Identifier of the offending record
    pub record: String,
    /// The text that failed to parse
    pub value: String,
    /// The period the record would have counted toward
    pub period: Period,
}

impl MalformedAmount {
    /// The data error this exclusion represents
    pub fn to_error(&self) -> crate::error::LedgerError {
        crate::error::LedgerError::NumericFormat {
            record: self.record.clone(),
            value: self.value.clone(),
        }
    }
}

/// One period's totals, broken down by payment method
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodTotals {
    /// Method name -> summed amount
    pub by_method: BTreeMap<String, f64>,
}

impl PeriodTotals {
    /// The period total, recomputed as the sum over methods
    pub fn total(&self) -> f64 {
        self.by_method.values().sum()
    }
}

/// Period-by-period summary of one record series
#[derive(Debug, Clone, Default)]
pub struct MonthlySummary {
    /// Totals keyed by period, in chronological order
    pub periods: BTreeMap<Period, PeriodTotals>,
    /// Amounts excluded because they failed to parse
    pub malformed: Vec<MalformedAmount>,
}

impl MonthlySummary {
    fn add(&mut self, period: Period, method: &str, amount: f64) {
        let totals = self.periods.entry(period).or_default();
        *totals.by_method.entry(method.to_string()).or_insert(0.0) += amount;
    }

    fn exclude(&mut self, record: String, value: String, period: Period) {
        self.malformed.push(MalformedAmount {
            record,
            value,
            period,
        });
    }

    /// Every payment method appearing anywhere in the summary, sorted
    pub fn methods(&self) -> Vec<String> {
        let mut methods: Vec<String> = self
            .periods
            .values()
            .flat_map(|t| t.by_method.keys().cloned())
            .collect();
        methods.sort();
        methods.dedup();
        methods
    }

    /// Sum one column across all periods in the summary
    pub fn grand_total(&self, column: &SummaryColumn) -> f64 {
        self.periods
            .values()
            .map(|totals| match column {
                SummaryColumn::Method(name) => {
                    totals.by_method.get(name).copied().unwrap_or(0.0)
                }
                SummaryColumn::Total => totals.total(),
            })
            .sum()
    }
}

fn parse_amount(value: &str) -> Option<f64> {
    let parsed: f64 = value.trim().parse().ok()?;
    parsed.is_finite().then_some(parsed)
}

/// Summarize accepted deposits period by period
pub fn monthly_deposit_summary(
    snapshot: &LedgerSnapshot,
    filter: PeriodFilter,
) -> MonthlySummary {
    let mut summary = MonthlySummary::default();
    for deposit in &snapshot.deposits {
        if deposit.status != SubmissionStatus::Accepted || !filter.matches(deposit.period()) {
            continue;
        }
        match parse_amount(&deposit.amount) {
            Some(amount) => summary.add(deposit.period(), &deposit.payment_method, amount),
            None => summary.exclude(
                deposit.id.to_string(),
                deposit.amount.clone(),
                deposit.period(),
            ),
        }
    }
    summary
}

/// Summarize accepted expenses period by period
///
/// The period comes from the expense's calendar date, named the same way
/// deposit periods are, so the two summaries merge on identical keys.
pub fn monthly_expense_summary(
    snapshot: &LedgerSnapshot,
    filter: PeriodFilter,
) -> MonthlySummary {
    let mut summary = MonthlySummary::default();
    for expense in &snapshot.expenses {
        if expense.status != SubmissionStatus::Accepted || !filter.matches(expense.period()) {
            continue;
        }
        match parse_amount(&expense.amount) {
            Some(amount) => summary.add(expense.period(), &expense.payment_method, amount),
            None => summary.exclude(
                expense.id.to_string(),
                expense.amount.clone(),
                expense.period(),
            ),
        }
    }
    summary
}

/// Summarize accepted received funds period by period
pub fn monthly_received_summary(
    snapshot: &LedgerSnapshot,
    filter: PeriodFilter,
) -> MonthlySummary {
    let mut summary = MonthlySummary::default();
    for fund in &snapshot.received_funds {
        let period = Period::from_date(fund.date);
        if fund.status != SubmissionStatus::Accepted || !filter.matches(period) {
            continue;
        }
        match parse_amount(&fund.amount) {
            Some(amount) => summary.add(period, &fund.payment_method, amount),
            None => summary.exclude(fund.id.to_string(), fund.amount.clone(), period),
        }
    }
    summary
}

/// Cash in hand for one column: income grand total minus expense grand total
///
/// Negative values are valid and never clamped; they mean the column spent
/// more than it took in.
pub fn cash_in_hand(
    deposit_summary: &MonthlySummary,
    expense_summary: &MonthlySummary,
    column: &SummaryColumn,
) -> f64 {
    deposit_summary.grand_total(column) - expense_summary.grand_total(column)
}

/// What the club currently holds, per payment method
///
/// Inflow is accepted deposits plus accepted received funds; outflow is
/// accepted expenses. A method with spending but no income still appears,
/// with a negative balance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Holdings {
    /// Method name -> held amount
    pub by_method: BTreeMap<String, f64>,
    /// Amounts excluded because they failed to parse
    pub malformed: Vec<MalformedAmount>,
}

impl Holdings {
    /// Total held across all methods
    pub fn total(&self) -> f64 {
        self.by_method.values().sum()
    }
}

/// Compute holdings across the whole ledger
pub fn holdings(snapshot: &LedgerSnapshot) -> Holdings {
    let deposits = monthly_deposit_summary(snapshot, PeriodFilter::ALL);
    let received = monthly_received_summary(snapshot, PeriodFilter::ALL);
    let expenses = monthly_expense_summary(snapshot, PeriodFilter::ALL);

    let mut holdings = Holdings::default();
    for summary in [&deposits, &received] {
        for totals in summary.periods.values() {
            for (method, amount) in &totals.by_method {
                *holdings.by_method.entry(method.clone()).or_insert(0.0) += amount;
            }
        }
    }
    for totals in expenses.periods.values() {
        for (method, amount) in &totals.by_method {
            *holdings.by_method.entry(method.clone()).or_insert(0.0) -= amount;
        }
    }

    holdings.malformed = deposits.malformed;
    holdings.malformed.extend(received.malformed);
    holdings.malformed.extend(expenses.malformed);
    holdings
}

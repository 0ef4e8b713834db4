//! Defaulter detection
//!
//! A defaulter for a period is a roster member with no qualifying deposit in
//! that period. Which deposits qualify is a named policy, not an implicit
//! status filter buried in a query.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::{Member, Period, SubmissionStatus};
use crate::store::LedgerSnapshot;

/// Which deposits count as "has paid" when detecting defaulters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DefaulterPolicy {
    /// Any deposit record counts, whatever its status. A member whose
    /// payment is still Pending, or even Rejected, is not chased.
    #[default]
    AnyDeposit,
    /// Pending and Accepted count; a rejected payment leaves the member
    /// a defaulter.
    NonRejected,
    /// Only Accepted deposits count.
    AcceptedOnly,
}

impl DefaulterPolicy {
    fn qualifies(&self, status: SubmissionStatus) -> bool {
        match self {
            Self::AnyDeposit => true,
            Self::NonRejected => status != SubmissionStatus::Rejected,
            Self::AcceptedOnly => status == SubmissionStatus::Accepted,
        }
    }
}

/// Members with no qualifying deposit for the given period
///
/// Comes out in roster order (the snapshot's member ordering).
pub fn defaulters_for(
    snapshot: &LedgerSnapshot,
    period: Period,
    policy: DefaulterPolicy,
) -> Vec<Member> {
    let paid: HashSet<&str> = snapshot
        .deposits
        .iter()
        .filter(|d| d.period() == period && policy.qualifies(d.status))
        .map(|d| d.email.as_str())
        .collect();

    snapshot
        .members
        .iter()
        .filter(|m| !paid.contains(m.email.as_str()))
        .cloned()
        .collect()
}

/// Defaulters for every period that appears in the deposit series
///
/// Periods nobody has ever deposited for are absent from the result: the
/// deposit set defines which periods exist, so a club that started
/// collecting in March has no January row.
pub fn defaulters_by_period(
    snapshot: &LedgerSnapshot,
    policy: DefaulterPolicy,
) -> BTreeMap<Period, Vec<Member>> {
    let periods: HashSet<Period> = snapshot.deposits.iter().map(|d| d.period()).collect();

    periods
        .into_iter()
        .map(|period| (period, defaulters_for(snapshot, period, policy)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Deposit, DepositId, Month};

    fn member(name: &str, email: &str) -> Member {
        Member::new(name, email, format!("017-{}", name), "CSE", "Member")
    }

    fn deposit(email: &str, month: Month, status: SubmissionStatus) -> Deposit {
        Deposit {
            id: DepositId::new(),
            email: email.into(),
            month,
            year: 2024,
            payment_method: "bKash".into(),
            number: "0170".into(),
            transaction_id: format!("{}-{}", email, month.name()),
            amount: "100".into(),
            status,
        }
    }

    #[test]
    fn test_members_without_deposit_are_defaulters() {
        let snapshot = LedgerSnapshot {
            members: vec![
                member("Alice", "a@club.org"),
                member("Bob", "b@club.org"),
                member("Carol", "c@club.org"),
            ],
            deposits: vec![
                deposit("a@club.org", Month::January, SubmissionStatus::Accepted),
                deposit("b@club.org", Month::January, SubmissionStatus::Pending),
            ],
            ..Default::default()
        };

        let defaulters = defaulters_for(
            &snapshot,
            Period::new(Month::January, 2024),
            DefaulterPolicy::AnyDeposit,
        );
        let emails: Vec<&str> = defaulters.iter().map(|m| m.email.as_str()).collect();
        assert_eq!(emails, vec!["c@club.org"]);
    }

    #[test]
    fn test_policy_controls_which_statuses_count() {
        let snapshot = LedgerSnapshot {
            members: vec![member("Alice", "a@club.org")],
            deposits: vec![deposit(
                "a@club.org",
                Month::January,
                SubmissionStatus::Rejected,
            )],
            ..Default::default()
        };
        let january = Period::new(Month::January, 2024);

        // Under the default policy even a rejected deposit counts
        assert!(defaulters_for(&snapshot, january, DefaulterPolicy::AnyDeposit).is_empty());
        // Under NonRejected the member is chased again
        let defaulters = defaulters_for(&snapshot, january, DefaulterPolicy::NonRejected);
        assert_eq!(defaulters.len(), 1);
    }

    #[test]
    fn test_only_deposited_periods_appear() {
        let snapshot = LedgerSnapshot {
            members: vec![member("Alice", "a@club.org"), member("Bob", "b@club.org")],
            deposits: vec![deposit(
                "a@club.org",
                Month::March,
                SubmissionStatus::Accepted,
            )],
            ..Default::default()
        };

        let by_period = defaulters_by_period(&snapshot, DefaulterPolicy::AnyDeposit);
        assert_eq!(by_period.len(), 1);
        let march = &by_period[&Period::new(Month::March, 2024)];
        assert_eq!(march.len(), 1);
        assert_eq!(march[0].email, "b@club.org");
    }

    #[test]
    fn test_empty_deposit_series_yields_no_periods() {
        let snapshot = LedgerSnapshot {
            members: vec![member("Alice", "a@club.org")],
            ..Default::default()
        };
        assert!(defaulters_by_period(&snapshot, DefaulterPolicy::AnyDeposit).is_empty());
    }
}

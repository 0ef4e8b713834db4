//! Defaulter notification
//!
//! Mail delivery lives behind the [`MailDispatcher`] trait; the engine
//! builds messages and collects outcomes but never speaks SMTP itself.
//! Every recipient is attempted even when an earlier send fails.

use std::collections::BTreeMap;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Member, Period};
use crate::store::LedgerSnapshot;

use super::defaulters::{defaulters_by_period, DefaulterPolicy};

/// One outgoing mail
#[derive(Debug, Clone, PartialEq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Delivery backend for outgoing mail
pub trait MailDispatcher {
    /// Send one message; an error marks this recipient failed without
    /// aborting the batch
    fn send(&self, message: &MailMessage) -> Result<(), String>;
}

/// Result of a notification batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationOutcome {
    /// Emails that were delivered
    pub sent: Vec<String>,
    /// Emails that failed, with the dispatcher's reason
    pub failed: Vec<(String, String)>,
}

impl NotificationOutcome {
    /// Treat any failure as an error, keeping the counts
    pub fn into_result(self) -> LedgerResult<Self> {
        if self.failed.is_empty() {
            return Ok(self);
        }
        Err(LedgerError::Notification {
            attempted: self.sent.len() + self.failed.len(),
            failed: self.failed.len(),
        })
    }
}

/// Builds and dispatches dues reminders to defaulters
pub struct DefaulterNotifier<'a, D: MailDispatcher> {
    dispatcher: &'a D,
    sender_name: String,
}

impl<'a, D: MailDispatcher> DefaulterNotifier<'a, D> {
    /// Create a notifier with the given dispatcher and sender name
    pub fn new(dispatcher: &'a D, sender_name: impl Into<String>) -> Self {
        Self {
            dispatcher,
            sender_name: sender_name.into(),
        }
    }

    /// The reminder body for one member and their unpaid periods
    pub fn reminder_body(&self, member: &Member, periods: &[Period]) -> String {
        let period_list = periods
            .iter()
            .map(|p| p.label())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Dear {},\n\nThis is to inform you that you have not paid \
             your dues for the month of {}. Please clear your dues at \
             your earliest convenience.\n\nRegards,\n{}",
            member.name, period_list, self.sender_name
        )
    }

    /// Notify every defaulter under the given policy
    ///
    /// Each member receives one mail listing all their unpaid periods in
    /// chronological order. Recipients are attempted independently.
    pub fn notify_defaulters(
        &self,
        snapshot: &LedgerSnapshot,
        policy: DefaulterPolicy,
    ) -> NotificationOutcome {
        // Invert period -> members into member -> periods
        let mut unpaid: BTreeMap<String, (Member, Vec<Period>)> = BTreeMap::new();
        for (period, members) in defaulters_by_period(snapshot, policy) {
            for member in members {
                unpaid
                    .entry(member.email.clone())
                    .or_insert_with(|| (member, Vec::new()))
                    .1
                    .push(period);
            }
        }

        let mut outcome = NotificationOutcome::default();
        for (email, (member, periods)) in unpaid {
            let message = MailMessage {
                to: email.clone(),
                subject: "Dues payment reminder".to_string(),
                body: self.reminder_body(&member, &periods),
            };
            match self.dispatcher.send(&message) {
                Ok(()) => outcome.sent.push(email),
                Err(reason) => outcome.failed.push((email, reason)),
            }
        }
        outcome
    }
}

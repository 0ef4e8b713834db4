//! Event and event type models
//!
//! Scheduling entities sharing the same store as the ledger. They never
//! participate in financial aggregation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{EventId, EventTypeId};

/// A color-tagged category of events (meeting, workshop, social)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventType {
    /// Unique identifier
    pub id: EventTypeId,

    /// Type name (referenced by name from events)
    pub name: String,

    /// Display color, e.g. "#ff8800"
    pub color: String,
}

impl EventType {
    /// Create a new event type
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: EventTypeId::new(),
            name: name.into(),
            color: color.into(),
        }
    }
}

/// A scheduled club event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier
    pub id: EventId,

    /// Event title
    pub title: String,

    /// Free-text details
    #[serde(default)]
    pub details: String,

    /// First day of the event
    pub start: NaiveDate,

    /// Last day of the event (inclusive); equal to `start` for one-day events
    pub end: NaiveDate,

    /// Event type name (name-keyed reference)
    pub event_type: String,
}

impl Event {
    /// Create a one-day event
    pub fn on(
        title: impl Into<String>,
        date: NaiveDate,
        event_type: impl Into<String>,
    ) -> Self {
        Self {
            id: EventId::new(),
            title: title.into(),
            details: String::new(),
            start: date,
            end: date,
            event_type: event_type.into(),
        }
    }
}

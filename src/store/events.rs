//! Event and event type repository
//!
//! Scheduling data shares the store with the ledger but never enters
//! financial aggregation. Both collections live in one file.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Event, EventId, EventType, EventTypeId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable event data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct EventData {
    event_types: Vec<EventType>,
    events: Vec<Event>,
}

#[derive(Debug, Default)]
struct EventTable {
    types: HashMap<EventTypeId, EventType>,
    events: HashMap<EventId, Event>,
}

/// Repository for events and their types
pub struct EventRepository {
    path: PathBuf,
    table: RwLock<EventTable>,
}

impl EventRepository {
    /// Create a new event repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            table: RwLock::new(EventTable::default()),
        }
    }

    fn read_table(&self) -> LedgerResult<std::sync::RwLockReadGuard<'_, EventTable>> {
        self.table
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_table(&self) -> LedgerResult<std::sync::RwLockWriteGuard<'_, EventTable>> {
        self.table
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load events and types from disk
    pub fn load(&self) -> LedgerResult<()> {
        let file_data: EventData = read_json(&self.path)?;

        let mut table = self.write_table()?;
        *table = EventTable::default();
        for event_type in file_data.event_types {
            table.types.insert(event_type.id, event_type);
        }
        for event in file_data.events {
            table.events.insert(event.id, event);
        }
        Ok(())
    }

    /// Save events and types to disk
    pub fn save(&self) -> LedgerResult<()> {
        let table = self.read_table()?;
        let mut event_types: Vec<_> = table.types.values().cloned().collect();
        event_types.sort_by(|a, b| a.name.cmp(&b.name));
        let mut events: Vec<_> = table.events.values().cloned().collect();
        events.sort_by(|a, b| a.start.cmp(&b.start).then(a.title.cmp(&b.title)));
        write_json_atomic(
            &self.path,
            &EventData {
                event_types,
                events,
            },
        )
    }

    /// Insert a new event type; names are unique
    pub fn insert_type(&self, event_type: EventType) -> LedgerResult<EventType> {
        let mut table = self.write_table()?;
        if table.types.values().any(|t| t.name == event_type.name) {
            return Err(LedgerError::Duplicate(format!(
                "event type {} already exists",
                event_type.name
            )));
        }
        table.types.insert(event_type.id, event_type.clone());
        Ok(event_type)
    }

    /// Insert a new event; its type must already exist
    pub fn insert_event(&self, event: Event) -> LedgerResult<Event> {
        let mut table = self.write_table()?;
        if !table.types.values().any(|t| t.name == event.event_type) {
            return Err(LedgerError::Validation(format!(
                "unknown event type {}",
                event.event_type
            )));
        }
        table.events.insert(event.id, event.clone());
        Ok(event)
    }

    /// Get all event types, ordered by name
    pub fn get_types(&self) -> LedgerResult<Vec<EventType>> {
        let table = self.read_table()?;
        let mut types: Vec<_> = table.types.values().cloned().collect();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(types)
    }

    /// Get all events, ordered by start date
    pub fn get_events(&self) -> LedgerResult<Vec<Event>> {
        let table = self.read_table()?;
        let mut events: Vec<_> = table.events.values().cloned().collect();
        events.sort_by(|a, b| a.start.cmp(&b.start).then(a.title.cmp(&b.title)));
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_event_requires_known_type() {
        let temp_dir = TempDir::new().unwrap();
        let repo = EventRepository::new(temp_dir.path().join("events.json"));
        repo.load().unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let err = repo
            .insert_event(Event::on("General meeting", date, "Meeting"))
            .unwrap_err();
        assert!(err.is_validation());

        repo.insert_type(EventType::new("Meeting", "#ff8800"))
            .unwrap();
        repo.insert_event(Event::on("General meeting", date, "Meeting"))
            .unwrap();
        assert_eq!(repo.get_events().unwrap().len(), 1);
    }
}

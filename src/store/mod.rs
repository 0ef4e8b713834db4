//! JSON-backed store adapter
//!
//! One repository per collection, each a `RwLock`-guarded table persisted to
//! its own JSON file with atomic writes. Conditional writes (dedup checks,
//! transaction-id uniqueness, terminal-state refusal) live here, under the
//! same lock as the mutation they guard.
//!
//! Readers that compute over the ledger take a [`LedgerSnapshot`] instead of
//! the live store; [`LedgerStore::subscribe`] delivers a fresh snapshot after
//! every published change.

pub mod departments;
pub mod deposits;
pub mod events;
pub mod expenses;
pub mod file_io;
pub mod members;
pub mod payment_methods;
pub mod received_funds;
pub mod snapshot;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use crate::config::ClubPaths;
use crate::error::{LedgerError, LedgerResult};

pub use departments::DepartmentRepository;
pub use deposits::DepositRepository;
pub use events::EventRepository;
pub use expenses::ExpenseRepository;
pub use members::MemberRepository;
pub use payment_methods::PaymentMethodRepository;
pub use received_funds::ReceivedFundRepository;
pub use snapshot::LedgerSnapshot;

type Listener = Box<dyn Fn(&LedgerSnapshot) + Send + Sync>;

#[derive(Default)]
struct ListenerRegistry {
    next_id: u64,
    listeners: HashMap<u64, Listener>,
}

/// Handle to a snapshot subscription; dropping it unsubscribes
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<ListenerRegistry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut registry) = registry.lock() {
                registry.listeners.remove(&self.id);
            }
        }
    }
}

/// Central store coordinating all repositories
pub struct LedgerStore {
    pub members: MemberRepository,
    pub departments: DepartmentRepository,
    pub payment_methods: PaymentMethodRepository,
    pub deposits: DepositRepository,
    pub expenses: ExpenseRepository,
    pub received_funds: ReceivedFundRepository,
    pub events: EventRepository,
    registry: Arc<Mutex<ListenerRegistry>>,
}

impl LedgerStore {
    /// Create a store rooted at the configured data paths
    pub fn new(paths: &ClubPaths) -> Self {
        Self {
            members: MemberRepository::new(paths.members_file()),
            departments: DepartmentRepository::new(paths.departments_file()),
            payment_methods: PaymentMethodRepository::new(paths.payment_methods_file()),
            deposits: DepositRepository::new(paths.deposits_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            received_funds: ReceivedFundRepository::new(paths.received_funds_file()),
            events: EventRepository::new(paths.events_file()),
            registry: Arc::new(Mutex::new(ListenerRegistry::default())),
        }
    }

    /// Load every collection from disk
    pub fn load_all(&self) -> LedgerResult<()> {
        self.members.load()?;
        self.departments.load()?;
        self.payment_methods.load()?;
        self.deposits.load()?;
        self.expenses.load()?;
        self.received_funds.load()?;
        self.events.load()?;
        Ok(())
    }

    /// Save every collection to disk
    pub fn save_all(&self) -> LedgerResult<()> {
        self.members.save()?;
        self.departments.save()?;
        self.payment_methods.save()?;
        self.deposits.save()?;
        self.expenses.save()?;
        self.received_funds.save()?;
        self.events.save()?;
        Ok(())
    }

    /// Take an owned, point-in-time snapshot of every collection
    pub fn snapshot(&self) -> LedgerResult<LedgerSnapshot> {
        Ok(LedgerSnapshot {
            members: self.members.get_all()?,
            departments: self.departments.get_all()?,
            payment_methods: self.payment_methods.get_all()?,
            deposits: self.deposits.get_all()?,
            expenses: self.expenses.get_all()?,
            received_funds: self.received_funds.get_all()?,
            event_types: self.events.get_types()?,
            events: self.events.get_events()?,
        })
    }

    /// Register a listener that receives a fresh snapshot on every publish
    ///
    /// The returned [`Subscription`] tears the listener down when dropped,
    /// so a stale consumer cannot keep receiving updates.
    pub fn subscribe<F>(&self, listener: F) -> LedgerResult<Subscription>
    where
        F: Fn(&LedgerSnapshot) + Send + Sync + 'static,
    {
        let mut registry = self
            .registry
            .lock()
            .map_err(|e| LedgerError::Storage(format!("Failed to lock listener registry: {}", e)))?;

        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.insert(id, Box::new(listener));

        Ok(Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        })
    }

    /// Deliver the current snapshot to every subscriber
    ///
    /// Services call this after a successful write so consumers always see a
    /// complete state, never an incremental patch.
    pub fn publish(&self) -> LedgerResult<()> {
        let snapshot = self.snapshot()?;
        let registry = self
            .registry
            .lock()
            .map_err(|e| LedgerError::Storage(format!("Failed to lock listener registry: {}", e)))?;
        for listener in registry.listeners.values() {
            listener(&snapshot);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Member;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn store() -> (TempDir, LedgerStore) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ClubPaths::with_root(temp_dir.path().to_path_buf());
        let store = LedgerStore::new(&paths);
        store.load_all().unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_snapshot_is_detached_from_store() {
        let (_tmp, store) = store();
        let before = store.snapshot().unwrap();

        store
            .members
            .register(Member::new("Alice", "alice@club.org", "0171", "CSE", "Treasurer"))
            .unwrap();

        assert!(before.members.is_empty());
        assert_eq!(store.snapshot().unwrap().members.len(), 1);
    }

    #[test]
    fn test_subscriber_receives_snapshot_on_publish() {
        let (_tmp, store) = store();
        let seen = Arc::new(AtomicUsize::new(0));

        let seen_in_listener = Arc::clone(&seen);
        let _sub = store
            .subscribe(move |snapshot| {
                seen_in_listener.store(snapshot.members.len(), Ordering::SeqCst);
            })
            .unwrap();

        store
            .members
            .register(Member::new("Alice", "alice@club.org", "0171", "CSE", "Treasurer"))
            .unwrap();
        store.publish().unwrap();

        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dropped_subscription_stops_delivery() {
        let (_tmp, store) = store();
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_in_listener = Arc::clone(&calls);
        let sub = store
            .subscribe(move |_| {
                calls_in_listener.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        store.publish().unwrap();
        drop(sub);
        store.publish().unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ClubPaths::with_root(temp_dir.path().to_path_buf());

        let store = LedgerStore::new(&paths);
        store.load_all().unwrap();
        store
            .members
            .register(Member::new("Alice", "alice@club.org", "0171", "CSE", "Treasurer"))
            .unwrap();
        store.save_all().unwrap();

        let reloaded = LedgerStore::new(&paths);
        reloaded.load_all().unwrap();
        assert_eq!(reloaded.members.count().unwrap(), 1);
    }
}

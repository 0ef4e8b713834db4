//! Member roster repository
//!
//! Registration refuses a new member when the email or contact number is
//! already taken, or when the same name already holds the same position in
//! the same department. The checks and the insert share one write lock.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Member, MemberId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable member data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct MemberData {
    members: Vec<Member>,
}

#[derive(Debug, Default)]
struct MemberTable {
    rows: HashMap<MemberId, Member>,
    /// Index: email -> member id
    by_email: HashMap<String, MemberId>,
    /// Index: contact number -> member id
    by_contact: HashMap<String, MemberId>,
}

impl MemberTable {
    fn index(&mut self, member: &Member) {
        self.by_email.insert(member.email.clone(), member.id);
        self.by_contact.insert(member.contact.clone(), member.id);
    }
}

/// Repository for the member roster
pub struct MemberRepository {
    path: PathBuf,
    table: RwLock<MemberTable>,
}

impl MemberRepository {
    /// Create a new member repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            table: RwLock::new(MemberTable::default()),
        }
    }

    fn read_table(&self) -> LedgerResult<std::sync::RwLockReadGuard<'_, MemberTable>> {
        self.table
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_table(&self) -> LedgerResult<std::sync::RwLockWriteGuard<'_, MemberTable>> {
        self.table
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load members from disk and rebuild indexes
    pub fn load(&self) -> LedgerResult<()> {
        let file_data: MemberData = read_json(&self.path)?;

        let mut table = self.write_table()?;
        *table = MemberTable::default();
        for member in file_data.members {
            table.index(&member);
            table.rows.insert(member.id, member);
        }
        Ok(())
    }

    /// Save members to disk
    pub fn save(&self) -> LedgerResult<()> {
        let table = self.read_table()?;
        let mut members: Vec<_> = table.rows.values().cloned().collect();
        members.sort_by(|a, b| a.name.cmp(&b.name).then(a.email.cmp(&b.email)));
        write_json_atomic(&self.path, &MemberData { members })
    }

    /// Register a new member, or refuse without changing the roster
    pub fn register(&self, member: Member) -> LedgerResult<Member> {
        member.validate().map_err(LedgerError::Validation)?;

        let mut table = self.write_table()?;

        if table.by_email.contains_key(&member.email) {
            return Err(LedgerError::Duplicate(format!(
                "a member with email {} is already registered",
                member.email
            )));
        }
        if table.by_contact.contains_key(&member.contact) {
            return Err(LedgerError::Duplicate(format!(
                "a member with contact {} is already registered",
                member.contact
            )));
        }
        let same_post = table.rows.values().any(|m| {
            m.name == member.name
                && m.position == member.position
                && m.department == member.department
        });
        if same_post {
            return Err(LedgerError::Duplicate(format!(
                "{} is already registered as {} of {}",
                member.name, member.position, member.department
            )));
        }

        table.index(&member);
        table.rows.insert(member.id, member.clone());
        Ok(member)
    }

    /// Get a member by ID
    pub fn get(&self, id: MemberId) -> LedgerResult<Option<Member>> {
        Ok(self.read_table()?.rows.get(&id).cloned())
    }

    /// Get a member by email
    pub fn get_by_email(&self, email: &str) -> LedgerResult<Option<Member>> {
        let table = self.read_table()?;
        Ok(table
            .by_email
            .get(email)
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    /// Get all members, ordered by name
    pub fn get_all(&self) -> LedgerResult<Vec<Member>> {
        let table = self.read_table()?;
        let mut members: Vec<_> = table.rows.values().cloned().collect();
        members.sort_by(|a, b| a.name.cmp(&b.name).then(a.email.cmp(&b.email)));
        Ok(members)
    }

    /// Update an existing member in place
    pub fn update(&self, member: Member) -> LedgerResult<Member> {
        member.validate().map_err(LedgerError::Validation)?;

        let mut table = self.write_table()?;
        let old = table
            .rows
            .get(&member.id)
            .cloned()
            .ok_or_else(|| LedgerError::member_not_found(member.email.clone()))?;

        table.by_email.remove(&old.email);
        table.by_contact.remove(&old.contact);
        table.index(&member);
        table.rows.insert(member.id, member.clone());
        Ok(member)
    }

    /// Count registered members
    pub fn count(&self) -> LedgerResult<usize> {
        Ok(self.read_table()?.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo() -> (TempDir, MemberRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = MemberRepository::new(temp_dir.path().join("members.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    #[test]
    fn test_register_and_lookup_by_email() {
        let (_tmp, repo) = repo();
        repo.register(Member::new("Alice", "alice@club.org", "0171", "CSE", "Treasurer"))
            .unwrap();

        let found = repo.get_by_email("alice@club.org").unwrap().unwrap();
        assert_eq!(found.name, "Alice");
    }

    #[test]
    fn test_duplicate_email_refused() {
        let (_tmp, repo) = repo();
        repo.register(Member::new("Alice", "alice@club.org", "0171", "CSE", "Treasurer"))
            .unwrap();

        let err = repo
            .register(Member::new("Alicia", "alice@club.org", "0172", "EEE", "Member"))
            .unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_contact_refused() {
        let (_tmp, repo) = repo();
        repo.register(Member::new("Alice", "alice@club.org", "0171", "CSE", "Treasurer"))
            .unwrap();

        let err = repo
            .register(Member::new("Bob", "bob@club.org", "0171", "EEE", "Member"))
            .unwrap_err();
        assert!(err.is_duplicate());
    }

    #[test]
    fn test_same_name_post_department_refused() {
        let (_tmp, repo) = repo();
        repo.register(Member::new("Alice", "alice@club.org", "0171", "CSE", "Treasurer"))
            .unwrap();

        let err = repo
            .register(Member::new("Alice", "alice2@club.org", "0172", "CSE", "Treasurer"))
            .unwrap_err();
        assert!(err.is_duplicate());

        // Same name is fine in a different department
        repo.register(Member::new("Alice", "alice3@club.org", "0173", "EEE", "Treasurer"))
            .unwrap();
    }

    #[test]
    fn test_update_reindexes_email() {
        let (_tmp, repo) = repo();
        let mut member = repo
            .register(Member::new("Alice", "alice@club.org", "0171", "CSE", "Treasurer"))
            .unwrap();

        member.email = "alice.new@club.org".into();
        repo.update(member).unwrap();

        assert!(repo.get_by_email("alice@club.org").unwrap().is_none());
        assert!(repo.get_by_email("alice.new@club.org").unwrap().is_some());
    }
}

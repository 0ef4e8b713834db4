//! Member model
//!
//! A member is identified everywhere else in the ledger by email: deposits
//! and expenses carry the member's email as their foreign key.

use serde::{Deserialize, Serialize};

use super::ids::MemberId;

/// A registered club member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier
    pub id: MemberId,

    /// Display name
    pub name: String,

    /// Email address (unique; foreign key for all submissions)
    pub email: String,

    /// Contact number (unique at registration)
    pub contact: String,

    /// Department name
    pub department: String,

    /// Position name within the department
    pub position: String,

    /// Whether the member may approve or reject submissions
    #[serde(default)]
    pub is_admin: bool,
}

impl Member {
    /// Create a new (non-admin) member
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        contact: impl Into<String>,
        department: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        Self {
            id: MemberId::new(),
            name: name.into(),
            email: email.into(),
            contact: contact.into(),
            department: department.into(),
            position: position.into(),
            is_admin: false,
        }
    }

    /// Validate the member's required fields
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Member name cannot be empty".into());
        }
        if self.email.trim().is_empty() {
            return Err("Member email cannot be empty".into());
        }
        if self.contact.trim().is_empty() {
            return Err("Member contact cannot be empty".into());
        }
        if self.department.trim().is_empty() {
            return Err("Member department cannot be empty".into());
        }
        if self.position.trim().is_empty() {
            return Err("Member position cannot be empty".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_member_defaults() {
        let member = Member::new("Alice", "alice@club.org", "0171", "CSE", "Treasurer");
        assert!(!member.is_admin);
        assert!(member.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let member = Member::new("", "alice@club.org", "0171", "CSE", "Treasurer");
        assert!(member.validate().is_err());

        let member = Member::new("Alice", "  ", "0171", "CSE", "Treasurer");
        assert!(member.validate().is_err());
    }
}

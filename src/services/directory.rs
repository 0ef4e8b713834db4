//! Roster directory: hierarchy-ordered views of members
//!
//! Built once from a snapshot; the (department, position) -> rank map is
//! flattened up front so per-member lookups never walk the department list.

use std::collections::{BTreeMap, HashMap};

use crate::models::{Department, Member, Position, UNKNOWN_HIERARCHY};
use crate::store::LedgerSnapshot;

/// Hierarchy-aware view of the member roster at one instant
pub struct Directory {
    members: Vec<Member>,
    departments: Vec<Department>,
    /// Flat rank map: (department name, position name) -> hierarchy
    ranks: HashMap<(String, String), i32>,
}

impl Directory {
    /// Build a directory from a ledger snapshot
    pub fn from_snapshot(snapshot: &LedgerSnapshot) -> Self {
        let mut ranks = HashMap::new();
        for department in &snapshot.departments {
            for position in &department.positions {
                ranks.insert(
                    (department.name.clone(), position.name.clone()),
                    position.hierarchy,
                );
            }
        }
        Self {
            members: snapshot.members.clone(),
            departments: snapshot.departments.clone(),
            ranks,
        }
    }

    /// Rank of a position within a department
    ///
    /// Unknown pairs get [`UNKNOWN_HIERARCHY`] and sort last; a member whose
    /// position was removed from the department still appears in rosters.
    pub fn hierarchy_of(&self, department: &str, position: &str) -> i32 {
        self.ranks
            .get(&(department.to_string(), position.to_string()))
            .copied()
            .unwrap_or(UNKNOWN_HIERARCHY)
    }

    /// Members of one department, ordered by ascending hierarchy
    ///
    /// Unranked members sort after ranked ones; the sort is stable, so ties
    /// keep roster order.
    pub fn members_of_department(&self, department: &str) -> Vec<&Member> {
        let mut members: Vec<&Member> = self
            .members
            .iter()
            .filter(|m| m.department == department)
            .collect();
        members.sort_by_key(|m| {
            let rank = self.hierarchy_of(&m.department, &m.position);
            (rank == UNKNOWN_HIERARCHY, rank)
        });
        members
    }

    /// The whole roster, grouped by department and ordered by hierarchy
    /// within each group
    pub fn members_by_department(&self) -> BTreeMap<String, Vec<Member>> {
        let mut departments: Vec<String> = self
            .members
            .iter()
            .map(|m| m.department.clone())
            .collect();
        departments.sort();
        departments.dedup();

        departments
            .into_iter()
            .map(|name| {
                let members = self
                    .members_of_department(&name)
                    .into_iter()
                    .cloned()
                    .collect();
                (name, members)
            })
            .collect()
    }

    /// A department's positions, ordered by ascending hierarchy
    pub fn ranked_positions(&self, department: &str) -> Vec<Position> {
        self.departments
            .iter()
            .find(|d| d.name == department)
            .map(|d| d.ranked_positions().into_iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> LedgerSnapshot {
        let mut cse = Department::new("CSE");
        cse.positions.push(Position::new("President", 0));
        cse.positions.push(Position::new("Treasurer", 1));
        cse.positions.push(Position::new("Member", 5));

        LedgerSnapshot {
            departments: vec![cse],
            members: vec![
                Member::new("Dana", "dana@club.org", "0174", "CSE", "Member"),
                Member::new("Alice", "alice@club.org", "0171", "CSE", "President"),
                Member::new("Bob", "bob@club.org", "0172", "CSE", "Mascot"),
                Member::new("Carol", "carol@club.org", "0173", "CSE", "Treasurer"),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_members_ordered_by_hierarchy_unranked_last() {
        let directory = Directory::from_snapshot(&snapshot());
        let names: Vec<&str> = directory
            .members_of_department("CSE")
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        // Bob holds a position the department doesn't configure, so he
        // sorts last rather than disappearing.
        assert_eq!(names, vec!["Alice", "Carol", "Dana", "Bob"]);
    }

    #[test]
    fn test_unknown_pair_gets_sentinel() {
        let directory = Directory::from_snapshot(&snapshot());
        assert_eq!(directory.hierarchy_of("CSE", "President"), 0);
        assert_eq!(
            directory.hierarchy_of("CSE", "Mascot"),
            UNKNOWN_HIERARCHY
        );
        assert_eq!(
            directory.hierarchy_of("EEE", "President"),
            UNKNOWN_HIERARCHY
        );
    }

    #[test]
    fn test_members_grouped_by_department() {
        let mut snap = snapshot();
        snap.members
            .push(Member::new("Erin", "erin@club.org", "0175", "EEE", "Lead"));

        let directory = Directory::from_snapshot(&snap);
        let grouped = directory.members_by_department();
        let departments: Vec<&str> = grouped.keys().map(|d| d.as_str()).collect();
        assert_eq!(departments, vec!["CSE", "EEE"]);
        assert_eq!(grouped["EEE"].len(), 1);
        assert_eq!(grouped["CSE"][0].name, "Alice");
    }

    #[test]
    fn test_ranked_positions_for_department() {
        let directory = Directory::from_snapshot(&snapshot());
        let names: Vec<String> = directory
            .ranked_positions("CSE")
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["President", "Treasurer", "Member"]);
        assert!(directory.ranked_positions("EEE").is_empty());
    }
}

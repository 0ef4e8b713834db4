//! Department and position models
//!
//! Each department owns an ordered collection of positions. A position's
//! integer `hierarchy` rank (lower = senior) is used only to order members
//! for display, never for authorization.

use serde::{Deserialize, Serialize};

use super::ids::{DepartmentId, PositionId};

/// Sentinel hierarchy rank for a position unknown in a department.
/// Callers must treat this as "sort last", never as an error.
pub const UNKNOWN_HIERARCHY: i32 = -1;

/// A ranked position within a department
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// Unique identifier
    pub id: PositionId,

    /// Position name (referenced by name from member records)
    pub name: String,

    /// Display rank; lower values sort first
    pub hierarchy: i32,
}

impl Position {
    /// Create a new position with the given rank
    pub fn new(name: impl Into<String>, hierarchy: i32) -> Self {
        Self {
            id: PositionId::new(),
            name: name.into(),
            hierarchy,
        }
    }
}

/// A club department with its ranked positions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    /// Unique identifier
    pub id: DepartmentId,

    /// Department name (referenced by name from member records)
    pub name: String,

    /// Positions owned by this department
    #[serde(default)]
    pub positions: Vec<Position>,
}

impl Department {
    /// Create a new department with no positions
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: DepartmentId::new(),
            name: name.into(),
            positions: Vec::new(),
        }
    }

    /// Look up a position's hierarchy rank by name
    ///
    /// Returns [`UNKNOWN_HIERARCHY`] if the position is not configured in
    /// this department.
    pub fn hierarchy_of(&self, position: &str) -> i32 {
        self.positions
            .iter()
            .find(|p| p.name == position)
            .map(|p| p.hierarchy)
            .unwrap_or(UNKNOWN_HIERARCHY)
    }

    /// Positions sorted by ascending hierarchy (stable on ties)
    pub fn ranked_positions(&self) -> Vec<&Position> {
        let mut ranked: Vec<&Position> = self.positions.iter().collect();
        ranked.sort_by_key(|p| p.hierarchy);
        ranked
    }
}

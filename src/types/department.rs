//! Department types.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a department.
///
/// Wraps a UUID and implements `Ord` for deterministic ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DepartmentId(Uuid);

impl DepartmentId {
    /// Create a new DepartmentId from a UUID.
    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Create a new DepartmentId from a UUID string.
    pub fn from_str(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Generate a new random DepartmentId (for testing).
    #[cfg(test)]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for DepartmentId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// A department participating in priority voting.
///
/// Read-only to the engine: voting weight drives vote aggregation,
/// utilization drives the capacity adjustment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    /// Unique department identifier.
    pub id: DepartmentId,
    /// Department name.
    pub name: String,
    /// Relative influence in vote aggregation (non-negative).
    pub voting_weight: f64,
    /// Current capacity utilization as a percentage (0-100, may exceed 100).
    pub utilization_pct: f64,
}

impl Department {
    /// Create a new department.
    pub fn new(id: DepartmentId, name: String, voting_weight: f64, utilization_pct: f64) -> Self {
        Self {
            id,
            name,
            voting_weight: voting_weight.max(0.0),
            utilization_pct: utilization_pct.max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_id_ordering() {
        let id1 = DepartmentId::from_str("00000000-0000-0000-0000-000000000001").unwrap();
        let id2 = DepartmentId::from_str("00000000-0000-0000-0000-000000000002").unwrap();
        assert!(id1 < id2);
    }

    #[test]
    fn test_negative_inputs_floored() {
        let dept = Department::new(
            DepartmentId::random(),
            "Engineering".to_string(),
            -1.0,
            -20.0,
        );
        assert_eq!(dept.voting_weight, 0.0);
        assert_eq!(dept.utilization_pct, 0.0);
    }
}

//! Work-request types and priority tier derivation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::department::DepartmentId;

/// Tier threshold: score at or above this is Critical.
pub const CRITICAL_THRESHOLD: f64 = 0.8;
/// Tier threshold: score at or above this is High.
pub const HIGH_THRESHOLD: f64 = 0.6;
/// Tier threshold: score at or above this is Medium.
pub const MEDIUM_THRESHOLD: f64 = 0.4;

/// Unique identifier for a work request.
///
/// Wraps a UUID and implements `Ord` for deterministic ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Create a new RequestId from a UUID.
    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Create a new RequestId from a UUID string.
    pub fn from_str(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Generate a new random RequestId (for testing).
    #[cfg(test)]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RequestId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Discrete priority tier derived from the numeric score.
///
/// Ordered by severity: `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriorityTier {
    /// Score below 0.4.
    Low,
    /// Score in [0.4, 0.6).
    Medium,
    /// Score in [0.6, 0.8).
    High,
    /// Score at or above 0.8.
    Critical,
}

impl PriorityTier {
    /// Derive the tier from a numeric score.
    ///
    /// Pure, deterministic, monotonically non-decreasing step function
    /// with no hysteresis. Thresholds are inclusive at the lower edge:
    /// a score of exactly 0.8 is Critical.
    pub fn from_score(score: f64) -> Self {
        if score >= CRITICAL_THRESHOLD {
            Self::Critical
        } else if score >= HIGH_THRESHOLD {
            Self::High
        } else if score >= MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Parse tier from string.
    pub fn parse(s: &str) -> Result<Self, TierParseError> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(TierParseError::Unknown(s.to_string())),
        }
    }
}

impl Default for PriorityTier {
    fn default() -> Self {
        Self::Low
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Error when parsing a priority tier from a string.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TierParseError {
    /// Unrecognized tier name.
    #[error("Unknown priority tier: {0}")]
    Unknown(String),
}

/// A work-intake request.
///
/// The engine mutates only `priority_score` and `priority_tier`; every
/// other field belongs to the surrounding request-management layer.
/// After any engine write, `priority_score` is in [0, 1] and
/// `priority_tier` equals `PriorityTier::from_score(priority_score)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkRequest {
    /// Unique request identifier.
    pub id: RequestId,
    /// Short human-readable summary.
    pub title: String,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
    /// Declared business value (non-negative, caller-supplied).
    pub business_value: f64,
    /// Owning department.
    pub department_id: DepartmentId,
    /// Current priority score in [0, 1].
    pub priority_score: f64,
    /// Current priority tier, consistent with the score.
    pub priority_tier: PriorityTier,
}

impl WorkRequest {
    /// Create a new work request with an unscored priority.
    pub fn new(
        id: RequestId,
        title: String,
        created_at: DateTime<Utc>,
        business_value: f64,
        department_id: DepartmentId,
    ) -> Self {
        Self {
            id,
            title,
            created_at,
            business_value: business_value.max(0.0),
            department_id,
            priority_score: 0.0,
            priority_tier: PriorityTier::Low,
        }
    }

    /// Apply a freshly computed score, keeping the tier consistent.
    pub fn apply_score(&mut self, score: f64) {
        self.priority_score = score.clamp(0.0, 1.0);
        self.priority_tier = PriorityTier::from_score(self.priority_score);
    }
}

// Equality and ordering follow the id so collections of requests have a
// deterministic order regardless of score churn.
impl PartialEq for WorkRequest {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for WorkRequest {}

impl PartialOrd for WorkRequest {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WorkRequest {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_ordering() {
        let id1 = RequestId::from_str("00000000-0000-0000-0000-000000000001").unwrap();
        let id2 = RequestId::from_str("00000000-0000-0000-0000-000000000002").unwrap();
        assert!(id1 < id2);
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(PriorityTier::from_score(0.0), PriorityTier::Low);
        assert_eq!(PriorityTier::from_score(0.39999), PriorityTier::Low);
        assert_eq!(PriorityTier::from_score(0.4), PriorityTier::Medium);
        assert_eq!(PriorityTier::from_score(0.59999), PriorityTier::Medium);
        assert_eq!(PriorityTier::from_score(0.6), PriorityTier::High);
        assert_eq!(PriorityTier::from_score(0.79999), PriorityTier::High);
        assert_eq!(PriorityTier::from_score(0.8), PriorityTier::Critical);
        assert_eq!(PriorityTier::from_score(1.0), PriorityTier::Critical);
    }

    #[test]
    fn test_tier_ordering_matches_severity() {
        assert!(PriorityTier::Low < PriorityTier::Medium);
        assert!(PriorityTier::Medium < PriorityTier::High);
        assert!(PriorityTier::High < PriorityTier::Critical);
    }

    #[test]
    fn test_tier_parsing() {
        assert_eq!(PriorityTier::parse("critical").unwrap(), PriorityTier::Critical);
        assert_eq!(PriorityTier::parse("HIGH").unwrap(), PriorityTier::High);
        assert!(PriorityTier::parse("urgent").is_err());
    }

    #[test]
    fn test_apply_score_clamps_and_derives_tier() {
        let mut request = WorkRequest::new(
            RequestId::random(),
            "test".to_string(),
            Utc::now(),
            0.0,
            DepartmentId::random(),
        );

        request.apply_score(1.7);
        assert_eq!(request.priority_score, 1.0);
        assert_eq!(request.priority_tier, PriorityTier::Critical);

        request.apply_score(-0.5);
        assert_eq!(request.priority_score, 0.0);
        assert_eq!(request.priority_tier, PriorityTier::Low);
    }

    #[test]
    fn test_negative_business_value_floored() {
        let request = WorkRequest::new(
            RequestId::random(),
            "test".to_string(),
            Utc::now(),
            -3.0,
            DepartmentId::random(),
        );
        assert_eq!(request.business_value, 0.0);
    }
}

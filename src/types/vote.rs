//! Priority vote types.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::department::DepartmentId;
use super::request::RequestId;

/// Value of a department's priority vote.
///
/// A closed set so the weight mapping stays exhaustive and
/// compiler-checked; free-form vote strings fail at the parse boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteValue {
    /// Low priority vote.
    Low,
    /// Medium priority vote.
    Medium,
    /// High priority vote.
    High,
}

impl VoteValue {
    /// Numeric weight of this vote for aggregation.
    pub fn weight(&self) -> f64 {
        match self {
            Self::High => 1.0,
            Self::Medium => 0.5,
            Self::Low => 0.1,
        }
    }

    /// Parse vote value from string.
    pub fn parse(s: &str) -> Result<Self, VoteParseError> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(VoteParseError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for VoteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Error when parsing a vote value from a string.
#[derive(Debug, Clone, thiserror::Error)]
pub enum VoteParseError {
    /// Unrecognized vote value.
    #[error("Unknown vote value: {0}")]
    Unknown(String),
}

/// A single priority vote cast by a department for a request.
///
/// Votes are created by department representatives outside the engine
/// and are read-only to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityVote {
    /// The request being voted on.
    pub request_id: RequestId,
    /// The department casting the vote.
    pub department_id: DepartmentId,
    /// The vote value.
    pub value: VoteValue,
}

impl PriorityVote {
    /// Create a new priority vote.
    pub fn new(request_id: RequestId, department_id: DepartmentId, value: VoteValue) -> Self {
        Self {
            request_id,
            department_id,
            value,
        }
    }
}

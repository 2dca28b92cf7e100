//! Core types for the priority scoring engine.

pub mod department;
pub mod request;
pub mod vote;

pub use department::{Department, DepartmentId};
pub use request::{PriorityTier, RequestId, TierParseError, WorkRequest};
pub use vote::{PriorityVote, VoteParseError, VoteValue};

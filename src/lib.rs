//! # intake-priority
//!
//! Priority scoring engine for a work-intake ticketing platform.
//!
//! The engine answers one question:
//!
//! > Given the votes, age, declared business value, and owning-department
//! > capacity of a work request, how urgent is it **right now**?
//!
//! ## Core Contract
//!
//! 1. Aggregate department votes into a weighted base priority
//! 2. Multiply by time-decay, business-value, and capacity factors
//! 3. Clamp the product to [0, 1] and derive a discrete priority tier
//! 4. Write score and tier back in a single store call
//!
//! ## Architecture
//!
//! ```text
//! WorkRequest → PriorityEngine → score ∈ [0,1] → PriorityTier
//!                    ↓
//!     VoteStore / DepartmentRegistry / ConfigSource   (reads)
//!                 RequestStore                        (write-back)
//! ```
//!
//! ## Consistency Guarantees
//!
//! - Factors are pure functions of call-time inputs; nothing is cached
//! - A vote, department, or configuration change is reflected by the next
//!   computation
//! - Score and tier are persisted together, never from different rounds
//! - Missing requests, missing departments, and empty vote sets resolve to
//!   defined numeric defaults, not errors

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod engine;
pub mod scoring;
pub mod store;
pub mod types;

// Re-exports
pub use config::{ConfigSource, InMemoryConfigSource};
pub use engine::{EngineError, PriorityEngine, SweepFailure, SweepReport, UpdateOutcome};
pub use scoring::{
    base_priority, business_value_weight, capacity_adjustment, clamp01, time_decay_factor,
};
pub use store::{
    DepartmentRegistry, InMemoryDepartmentRegistry, InMemoryRequestStore, InMemoryVoteStore,
    RequestStore, VoteStore,
};
pub use types::{
    Department, DepartmentId, PriorityTier, PriorityVote, RequestId, VoteValue, WorkRequest,
};

/// Schema version for all scoring types.
/// Increment on breaking changes to any serialized type.
pub const SCORING_SCHEMA_VERSION: &str = "1.0.0";

//! Collaborator storage interfaces.
//!
//! The engine consumes three read interfaces and one write operation, all
//! synchronous-request/response in contract. Implementations own their own
//! retry and timeout behavior; the engine performs none of its own.

pub mod memory;

use async_trait::async_trait;

use crate::types::{Department, DepartmentId, PriorityVote, RequestId, WorkRequest};

/// Store of priority votes, read-only to the engine.
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// Error type for store operations.
    type Error: std::error::Error + Send + Sync;

    /// Fetch all votes recorded against a request.
    async fn votes_for_request(&self, id: &RequestId) -> Result<Vec<PriorityVote>, Self::Error>;
}

/// Registry of departments and their voting attributes, read-only to the engine.
#[async_trait]
pub trait DepartmentRegistry: Send + Sync {
    /// Error type for registry operations.
    type Error: std::error::Error + Send + Sync;

    /// Fetch all departments (ordered by id for determinism).
    async fn all_departments(&self) -> Result<Vec<Department>, Self::Error>;

    /// Fetch a department by id.
    async fn department_by_id(&self, id: &DepartmentId)
        -> Result<Option<Department>, Self::Error>;
}

/// Store of work requests.
///
/// `update` must be safe under concurrent calls for distinct request ids;
/// the bounded-concurrency sweep relies on it.
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Error type for store operations.
    type Error: std::error::Error + Send + Sync;

    /// Fetch a request by id.
    async fn request_by_id(&self, id: &RequestId) -> Result<Option<WorkRequest>, Self::Error>;

    /// Fetch a snapshot of all requests currently eligible for recalculation.
    async fn all_active(&self) -> Result<Vec<WorkRequest>, Self::Error>;

    /// Persist the request's current score and tier (and any other fields
    /// the caller has set).
    ///
    /// A request deleted between the engine's load and this write may be
    /// treated as a successful no-op; implementations must not resurrect
    /// the deleted request.
    async fn update(&self, request: &WorkRequest) -> Result<(), Self::Error>;
}

pub use memory::{InMemoryDepartmentRegistry, InMemoryRequestStore, InMemoryVoteStore};

//! In-memory collaborator stores for testing and embedding.
//!
//! State lives in BTreeMaps behind `parking_lot` locks: iteration order is
//! deterministic and votes, departments, and requests may change between
//! engine calls, which the engine must reflect on its next computation.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use super::{DepartmentRegistry, RequestStore, VoteStore};
use crate::types::{Department, DepartmentId, PriorityVote, RequestId, WorkRequest};

/// Error type for in-memory stores.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InMemoryError {
    /// Request not found.
    #[error("Request not found: {0}")]
    RequestNotFound(RequestId),
}

/// In-memory vote store.
#[derive(Debug, Default)]
pub struct InMemoryVoteStore {
    /// Votes keyed by request, in insertion order per request.
    votes: RwLock<BTreeMap<RequestId, Vec<PriorityVote>>>,
}

impl InMemoryVoteStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a vote. Duplicate votes from one department are kept.
    pub fn add_vote(&self, vote: PriorityVote) {
        self.votes
            .write()
            .entry(vote.request_id)
            .or_default()
            .push(vote);
    }

    /// Remove all votes for a request.
    pub fn clear_votes(&self, id: &RequestId) {
        self.votes.write().remove(id);
    }

    /// Total number of votes across all requests.
    pub fn num_votes(&self) -> usize {
        self.votes.read().values().map(Vec::len).sum()
    }
}

#[async_trait]
impl VoteStore for InMemoryVoteStore {
    type Error = InMemoryError;

    async fn votes_for_request(&self, id: &RequestId) -> Result<Vec<PriorityVote>, Self::Error> {
        Ok(self.votes.read().get(id).cloned().unwrap_or_default())
    }
}

/// In-memory department registry.
#[derive(Debug, Default)]
pub struct InMemoryDepartmentRegistry {
    departments: RwLock<BTreeMap<DepartmentId, Department>>,
}

impl InMemoryDepartmentRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a department.
    pub fn add_department(&self, department: Department) {
        self.departments.write().insert(department.id, department);
    }

    /// Remove a department.
    pub fn remove_department(&self, id: &DepartmentId) {
        self.departments.write().remove(id);
    }

    /// Set a department's utilization percentage, if present.
    pub fn set_utilization(&self, id: &DepartmentId, utilization_pct: f64) {
        if let Some(department) = self.departments.write().get_mut(id) {
            department.utilization_pct = utilization_pct.max(0.0);
        }
    }

    /// Number of registered departments.
    pub fn num_departments(&self) -> usize {
        self.departments.read().len()
    }
}

#[async_trait]
impl DepartmentRegistry for InMemoryDepartmentRegistry {
    type Error = InMemoryError;

    async fn all_departments(&self) -> Result<Vec<Department>, Self::Error> {
        Ok(self.departments.read().values().cloned().collect())
    }

    async fn department_by_id(
        &self,
        id: &DepartmentId,
    ) -> Result<Option<Department>, Self::Error> {
        Ok(self.departments.read().get(id).cloned())
    }
}

/// In-memory work-request store.
///
/// `update` takes a write lock per call, so concurrent updates for distinct
/// request ids serialize briefly but never interleave within one request.
#[derive(Debug, Default)]
pub struct InMemoryRequestStore {
    requests: RwLock<BTreeMap<RequestId, WorkRequest>>,
    /// Requests excluded from the active snapshot (closed/rejected).
    inactive: RwLock<BTreeMap<RequestId, ()>>,
}

impl InMemoryRequestStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a request.
    pub fn add_request(&self, request: WorkRequest) {
        self.requests.write().insert(request.id, request);
    }

    /// Remove a request entirely.
    pub fn remove_request(&self, id: &RequestId) {
        self.requests.write().remove(id);
        self.inactive.write().remove(id);
    }

    /// Mark a request as no longer eligible for recalculation.
    pub fn deactivate(&self, id: &RequestId) {
        self.inactive.write().insert(*id, ());
    }

    /// Number of stored requests.
    pub fn num_requests(&self) -> usize {
        self.requests.read().len()
    }
}

#[async_trait]
impl RequestStore for InMemoryRequestStore {
    type Error = InMemoryError;

    async fn request_by_id(&self, id: &RequestId) -> Result<Option<WorkRequest>, Self::Error> {
        Ok(self.requests.read().get(id).cloned())
    }

    async fn all_active(&self) -> Result<Vec<WorkRequest>, Self::Error> {
        let inactive = self.inactive.read();
        Ok(self
            .requests
            .read()
            .values()
            .filter(|r| !inactive.contains_key(&r.id))
            .cloned()
            .collect())
    }

    async fn update(&self, request: &WorkRequest) -> Result<(), Self::Error> {
        let mut requests = self.requests.write();
        // A request deleted between the engine's load and this write is a
        // benign race: drop the write rather than resurrect the request.
        if let Some(existing) = requests.get_mut(&request.id) {
            *existing = request.clone();
        }
        Ok(())
    }
}

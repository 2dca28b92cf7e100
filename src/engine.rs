//! Priority scoring engine.
//!
//! The engine is stateless: every computation is a pure read-then-compute
//! step over the injected collaborators, followed by a single write-back of
//! score and tier. Concurrent invocations for different requests are
//! independent; for a single request the read-compute-write cycle is a
//! best-effort snapshot and the next recalculation corrects staleness.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::config::{defaults, keys, ConfigSource};
use crate::scoring;
use crate::store::{DepartmentRegistry, RequestStore, VoteStore};
use crate::types::{PriorityTier, RequestId, WorkRequest};

/// Error type for engine operations.
///
/// The taxonomy is narrow: missing requests, missing departments, empty
/// vote sets, and misconfigured values all resolve to defined numeric
/// defaults. Only collaborator failures surface as errors.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Collaborator store failure.
    #[error("Store error: {0}")]
    Store(String),
}

impl EngineError {
    /// Create a store error from any error type.
    pub fn from_store<E: std::error::Error>(e: E) -> Self {
        Self::Store(e.to_string())
    }
}

/// Outcome of a single-request priority update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UpdateOutcome {
    /// Score and tier were recomputed and written back.
    Updated {
        /// The clamped score that was persisted.
        score: f64,
        /// The tier derived from the score.
        tier: PriorityTier,
    },
    /// The request no longer exists; nothing was written.
    Skipped,
}

/// A per-request failure recorded during a bulk sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepFailure {
    /// The request whose update failed.
    pub request_id: RequestId,
    /// Collaborator error message.
    pub error: String,
}

/// Result of a bulk recalculation sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    /// Number of requests in the active snapshot.
    pub total: usize,
    /// Requests whose score and tier were written back.
    pub updated: usize,
    /// Requests skipped because they vanished mid-sweep.
    pub skipped: usize,
    /// Per-request failures; never abort the sweep.
    pub failures: Vec<SweepFailure>,
    /// Wall-clock duration of the sweep in milliseconds.
    pub elapsed_ms: u64,
}

impl SweepReport {
    /// Whether every request in the snapshot was processed cleanly.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Priority scoring engine over injected collaborators.
///
/// ## Contract
///
/// ```text
/// score = clamp01(base * time_decay * business_value * capacity_adjustment)
/// tier  = PriorityTier::from_score(score)
/// ```
///
/// All four factors are recomputed from the collaborators on every call;
/// a vote, department, or configuration change is reflected by the next
/// computation.
pub struct PriorityEngine<V, D, R, C> {
    votes: Arc<V>,
    departments: Arc<D>,
    requests: Arc<R>,
    config: Arc<C>,
}

impl<V, D, R, C> PriorityEngine<V, D, R, C>
where
    V: VoteStore,
    D: DepartmentRegistry,
    R: RequestStore,
    C: ConfigSource,
{
    /// Create a new engine over the given collaborators.
    pub fn new(votes: Arc<V>, departments: Arc<D>, requests: Arc<R>, config: Arc<C>) -> Self {
        Self {
            votes,
            departments,
            requests,
            config,
        }
    }

    /// Compute the priority score for a request as of now.
    ///
    /// The result is clamped to [0, 1]. Nothing is persisted.
    pub async fn compute_score(&self, request: &WorkRequest) -> Result<f64, EngineError> {
        self.compute_score_at(request, Utc::now()).await
    }

    /// Compute the priority score for a request at an explicit instant.
    ///
    /// Split out from [`compute_score`](Self::compute_score) so tests can
    /// pin the clock.
    pub async fn compute_score_at(
        &self,
        request: &WorkRequest,
        now: DateTime<Utc>,
    ) -> Result<f64, EngineError> {
        let votes = self
            .votes
            .votes_for_request(&request.id)
            .await
            .map_err(EngineError::from_store)?;
        let departments = self
            .departments
            .all_departments()
            .await
            .map_err(EngineError::from_store)?;

        let base = scoring::base_priority(&votes, &departments);

        let decay_enabled = self
            .config
            .get_bool(keys::TIME_DECAY_ENABLED)
            .unwrap_or(defaults::TIME_DECAY_ENABLED);
        let max_multiplier = self
            .config
            .get_decimal(keys::TIME_DECAY_MAX_MULTIPLIER)
            .unwrap_or(defaults::TIME_DECAY_MAX_MULTIPLIER);
        let decay = scoring::time_decay_factor(request.created_at, now, decay_enabled, max_multiplier);

        let base_weight = self
            .config
            .get_decimal(keys::BUSINESS_VALUE_BASE_WEIGHT)
            .unwrap_or(defaults::BUSINESS_VALUE_BASE_WEIGHT);
        let business = scoring::business_value_weight(request.business_value, base_weight);

        let capacity_enabled = self
            .config
            .get_bool(keys::CAPACITY_ADJUSTMENT_ENABLED)
            .unwrap_or(defaults::CAPACITY_ADJUSTMENT_ENABLED);
        // The disabled adjustment never touches the registry.
        let capacity = if capacity_enabled {
            let owning_department = self
                .departments
                .department_by_id(&request.department_id)
                .await
                .map_err(EngineError::from_store)?;
            scoring::capacity_adjustment(owning_department.as_ref(), true)
        } else {
            1.0
        };

        Ok(scoring::clamp01(base * decay * business * capacity))
    }

    /// Recompute and persist score and tier for one request.
    ///
    /// A missing request is a silent skip, not an error: the single-update
    /// path tolerates races with deletion. Score and tier are written back
    /// in one store call so a reader never observes them from different
    /// computation rounds.
    pub async fn update_priority(&self, id: &RequestId) -> Result<UpdateOutcome, EngineError> {
        self.update_priority_at(id, Utc::now()).await
    }

    /// [`update_priority`](Self::update_priority) with an explicit clock.
    pub async fn update_priority_at(
        &self,
        id: &RequestId,
        now: DateTime<Utc>,
    ) -> Result<UpdateOutcome, EngineError> {
        let Some(mut request) = self
            .requests
            .request_by_id(id)
            .await
            .map_err(EngineError::from_store)?
        else {
            tracing::debug!(request_id = %id, "request absent, skipping update");
            return Ok(UpdateOutcome::Skipped);
        };

        let score = self.compute_score_at(&request, now).await?;
        request.apply_score(score);

        self.requests
            .update(&request)
            .await
            .map_err(EngineError::from_store)?;

        tracing::debug!(
            request_id = %id,
            score = request.priority_score,
            tier = %request.priority_tier,
            "priority updated"
        );

        Ok(UpdateOutcome::Updated {
            score: request.priority_score,
            tier: request.priority_tier,
        })
    }

    /// Recompute scores for every request in the active snapshot.
    ///
    /// Requests are processed independently and sequentially; one request's
    /// failure or skip never aborts the sweep for the others. Requests
    /// added mid-sweep are picked up by the next sweep.
    pub async fn recalculate_all(&self) -> Result<SweepReport, EngineError> {
        self.recalculate_all_concurrent(1).await
    }

    /// [`recalculate_all`](Self::recalculate_all) with bounded fan-out.
    ///
    /// Up to `limit` requests are in flight at once; each task owns exactly
    /// one request's read-compute-write cycle. `limit == 0` is treated
    /// as 1. The request store's `update` must be safe under concurrent
    /// calls for distinct request ids.
    pub async fn recalculate_all_concurrent(
        &self,
        limit: usize,
    ) -> Result<SweepReport, EngineError> {
        let started = Instant::now();
        let now = Utc::now();

        let snapshot = self
            .requests
            .all_active()
            .await
            .map_err(EngineError::from_store)?;
        let total = snapshot.len();

        let outcomes: Vec<(RequestId, Result<UpdateOutcome, EngineError>)> =
            stream::iter(snapshot.into_iter().map(|request| {
                let id = request.id;
                async move { (id, self.update_priority_at(&id, now).await) }
            }))
            .buffer_unordered(limit.max(1))
            .collect()
            .await;

        let mut updated = 0;
        let mut skipped = 0;
        let mut failures = Vec::new();

        for (request_id, outcome) in outcomes {
            match outcome {
                Ok(UpdateOutcome::Updated { .. }) => updated += 1,
                Ok(UpdateOutcome::Skipped) => skipped += 1,
                Err(e) => {
                    tracing::warn!(request_id = %request_id, error = %e, "sweep update failed");
                    failures.push(SweepFailure {
                        request_id,
                        error: e.to_string(),
                    });
                }
            }
        }

        let report = SweepReport {
            total,
            updated,
            skipped,
            failures,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };

        tracing::info!(
            total = report.total,
            updated = report.updated,
            skipped = report.skipped,
            failed = report.failures.len(),
            elapsed_ms = report.elapsed_ms,
            "recalculation sweep complete"
        );

        Ok(report)
    }
}

//! Pure scoring factors for work-request prioritization.
//!
//! Each factor is a pure function of its explicit arguments; configuration
//! values are passed in by the engine, never read ambiently. The overall
//! score is:
//!
//! ```text
//! score = clamp01(base_priority * time_decay * business_value_weight * capacity_adjustment)
//! ```

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::types::{Department, DepartmentId, PriorityVote};

/// Fallback cap for the time-decay multiplier when the configured
/// maximum is absent or non-positive.
pub const DEFAULT_MAX_TIME_DECAY: f64 = 2.0;

/// Fallback baseline for the business-value weight when the configured
/// base weight is absent or non-positive.
pub const DEFAULT_BUSINESS_VALUE_BASE: f64 = 1.0;

/// Lower bound of the capacity adjustment.
pub const CAPACITY_ADJUSTMENT_MIN: f64 = 0.5;
/// Upper bound of the capacity adjustment.
pub const CAPACITY_ADJUSTMENT_MAX: f64 = 1.5;

/// Clamp a score to [0, 1].
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Weighted average of department votes for a request.
///
/// Each vote whose department exists in the registry snapshot contributes
/// `voting_weight * vote_weight` to the numerator and `voting_weight` to
/// the denominator. Returns 0.0 when votes or departments are empty, or
/// when the accumulated weight sum is zero.
///
/// Duplicate votes from one department each count independently; the
/// vote-entry layer is responsible for one-vote-per-department.
pub fn base_priority(votes: &[PriorityVote], departments: &[Department]) -> f64 {
    if votes.is_empty() || departments.is_empty() {
        return 0.0;
    }

    let weights: BTreeMap<DepartmentId, f64> = departments
        .iter()
        .map(|d| (d.id, d.voting_weight))
        .collect();

    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;

    for vote in votes {
        // Votes from departments no longer in the registry are excluded.
        if let Some(&voting_weight) = weights.get(&vote.department_id) {
            weighted_sum += voting_weight * vote.value.weight();
            weight_sum += voting_weight;
        }
    }

    if weight_sum <= 0.0 {
        return 0.0;
    }

    weighted_sum / weight_sum
}

/// Logarithmic, capped multiplier rewarding request age.
///
/// Disabled → 1.0. Otherwise `1.0 + ln(days_old + 1) / 100`, capped at
/// `max_multiplier` (or [`DEFAULT_MAX_TIME_DECAY`] when the configured
/// maximum is non-positive). Future-dated requests count as zero days old,
/// so the factor never drops below 1.0.
pub fn time_decay_factor(
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
    enabled: bool,
    max_multiplier: f64,
) -> f64 {
    if !enabled {
        return 1.0;
    }

    let days_old = (now - created_at).num_days().max(0);
    let factor = 1.0 + ((days_old + 1) as f64).ln() / 100.0;

    let cap = if max_multiplier > 0.0 {
        max_multiplier
    } else {
        DEFAULT_MAX_TIME_DECAY
    };

    factor.min(cap)
}

/// Additive factor from a configured baseline plus declared business value.
///
/// A zero-business-value request still gets the baseline, preserving the
/// effect of the other factors.
pub fn business_value_weight(business_value: f64, base_weight: f64) -> f64 {
    let base = if base_weight > 0.0 {
        base_weight
    } else {
        DEFAULT_BUSINESS_VALUE_BASE
    };

    base + business_value.max(0.0)
}

/// Multiplier in [0.5, 1.5] inversely related to department utilization.
///
/// Disabled, or owning department not found → 1.0. Otherwise
/// `1.5 - utilization_pct / 100`, clamped to the bounds.
pub fn capacity_adjustment(department: Option<&Department>, enabled: bool) -> f64 {
    if !enabled {
        return 1.0;
    }

    let Some(department) = department else {
        return 1.0;
    };

    let utilization_fraction = department.utilization_pct / 100.0;
    (CAPACITY_ADJUSTMENT_MAX - utilization_fraction)
        .clamp(CAPACITY_ADJUSTMENT_MIN, CAPACITY_ADJUSTMENT_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RequestId, VoteValue};
    use chrono::Duration;
    use uuid::Uuid;

    fn make_department(id: u128, voting_weight: f64, utilization_pct: f64) -> Department {
        Department::new(
            DepartmentId::new(Uuid::from_u128(id)),
            format!("dept_{id}"),
            voting_weight,
            utilization_pct,
        )
    }

    fn make_vote(department: &Department, value: VoteValue) -> PriorityVote {
        PriorityVote::new(
            RequestId::new(Uuid::from_u128(0xFF)),
            department.id,
            value,
        )
    }

    #[test]
    fn test_base_priority_single_high_vote() {
        let dept = make_department(1, 1.0, 50.0);
        let votes = vec![make_vote(&dept, VoteValue::High)];

        assert_eq!(base_priority(&votes, &[dept]), 1.0);
    }

    #[test]
    fn test_base_priority_weighted_average() {
        let big = make_department(1, 2.0, 50.0);
        let small = make_department(2, 1.0, 50.0);
        let votes = vec![
            make_vote(&big, VoteValue::Medium),
            make_vote(&small, VoteValue::Low),
        ];

        // (2.0 * 0.5 + 1.0 * 0.1) / 3.0
        let base = base_priority(&votes, &[big, small]);
        assert!((base - 1.1 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_base_priority_empty_inputs() {
        let dept = make_department(1, 1.0, 50.0);
        let votes = vec![make_vote(&dept, VoteValue::High)];

        assert_eq!(base_priority(&[], &[dept.clone()]), 0.0);
        assert_eq!(base_priority(&votes, &[]), 0.0);
    }

    #[test]
    fn test_base_priority_unknown_department_excluded() {
        let known = make_department(1, 1.0, 50.0);
        let ghost = make_department(2, 5.0, 50.0);
        let votes = vec![
            make_vote(&known, VoteValue::High),
            make_vote(&ghost, VoteValue::Low),
        ];

        // Only the known department's vote counts.
        assert_eq!(base_priority(&votes, &[known]), 1.0);
    }

    #[test]
    fn test_base_priority_zero_weight_guard() {
        let dept = make_department(1, 0.0, 50.0);
        let votes = vec![make_vote(&dept, VoteValue::High)];

        assert_eq!(base_priority(&votes, &[dept]), 0.0);
    }

    #[test]
    fn test_base_priority_duplicate_votes_count_independently() {
        let dept = make_department(1, 1.0, 50.0);
        let votes = vec![
            make_vote(&dept, VoteValue::High),
            make_vote(&dept, VoteValue::Low),
        ];

        // (1.0 * 1.0 + 1.0 * 0.1) / 2.0
        let base = base_priority(&votes, &[dept]);
        assert!((base - 0.55).abs() < 1e-9);
    }

    #[test]
    fn test_time_decay_disabled_is_neutral() {
        let now = Utc::now();
        let old = now - Duration::days(3650);

        assert_eq!(time_decay_factor(old, now, false, 2.0), 1.0);
    }

    #[test]
    fn test_time_decay_grows_with_age() {
        let now = Utc::now();

        let fresh = time_decay_factor(now, now, true, 2.0);
        let week = time_decay_factor(now - Duration::days(7), now, true, 2.0);
        let year = time_decay_factor(now - Duration::days(365), now, true, 2.0);

        assert_eq!(fresh, 1.0);
        assert!(week > fresh);
        assert!(year > week);
    }

    #[test]
    fn test_time_decay_capped_at_configured_max() {
        let now = Utc::now();
        let ancient = now - Duration::days(1_000_000);

        assert_eq!(time_decay_factor(ancient, now, true, 1.05), 1.05);
    }

    #[test]
    fn test_time_decay_nonpositive_cap_falls_back() {
        let now = Utc::now();
        let old = now - Duration::days(30);
        let with_default = time_decay_factor(old, now, true, 0.0);
        let explicit = time_decay_factor(old, now, true, DEFAULT_MAX_TIME_DECAY);

        assert_eq!(with_default, explicit);
    }

    #[test]
    fn test_time_decay_future_request_is_neutral() {
        let now = Utc::now();
        let future = now + Duration::days(5);

        assert_eq!(time_decay_factor(future, now, true, 2.0), 1.0);
    }

    #[test]
    fn test_business_value_weight_additive() {
        assert_eq!(business_value_weight(3.0, 1.0), 4.0);
        assert_eq!(business_value_weight(0.0, 2.5), 2.5);
    }

    #[test]
    fn test_business_value_weight_nonpositive_base_falls_back() {
        assert_eq!(business_value_weight(2.0, 0.0), 3.0);
        assert_eq!(business_value_weight(2.0, -1.0), 3.0);
    }

    #[test]
    fn test_capacity_adjustment_disabled_is_neutral() {
        let dept = make_department(1, 1.0, 95.0);
        assert_eq!(capacity_adjustment(Some(&dept), false), 1.0);
    }

    #[test]
    fn test_capacity_adjustment_missing_department_is_neutral() {
        assert_eq!(capacity_adjustment(None, true), 1.0);
    }

    #[test]
    fn test_capacity_adjustment_monotone_in_utilization() {
        let idle = make_department(1, 1.0, 0.0);
        let half = make_department(2, 1.0, 50.0);
        let full = make_department(3, 1.0, 100.0);
        let over = make_department(4, 1.0, 150.0);

        let a = capacity_adjustment(Some(&idle), true);
        let b = capacity_adjustment(Some(&half), true);
        let c = capacity_adjustment(Some(&full), true);
        let d = capacity_adjustment(Some(&over), true);

        assert_eq!(a, 1.5);
        assert_eq!(b, 1.0);
        assert_eq!(c, 0.5);
        assert_eq!(d, 0.5);
        assert!(a > b && b > c && c >= d);
    }

    #[test]
    fn test_clamp01_bounds() {
        assert_eq!(clamp01(-0.1), 0.0);
        assert_eq!(clamp01(0.5), 0.5);
        assert_eq!(clamp01(2.3), 1.0);
    }
}

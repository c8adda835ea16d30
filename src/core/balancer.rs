//! Least-loaded task distribution.
//!
//! The pick itself is pure; the caller runs it between reading the live
//! counters and writing the assignment, all inside one ledger transaction,
//! so two concurrent assignments can never both act on the same stale
//! minimum.

use crate::errors::AppError;
use crate::models::manager::ManagerAvailability;

/// Candidates that may receive work on the project: active, not on leave,
/// assigned to it.
pub fn eligible<'a>(
    candidates: &'a [ManagerAvailability],
    project_id: &str,
) -> Vec<&'a ManagerAvailability> {
    candidates
        .iter()
        .filter(|m| m.is_eligible_for(project_id))
        .collect()
}

/// Pick the manager with the smallest open-task count. Ties break on
/// manager id ascending — a documented policy choice so repeated runs
/// against the same state are reproducible.
pub fn pick_least_loaded(counters: &[(String, i64)]) -> Option<String> {
    counters
        .iter()
        .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)))
        .map(|(id, _)| id.clone())
}

/// The typed rejection for an empty eligible pool, with the reason the
/// requester sees.
pub fn no_eligible_manager(project_id: &str) -> AppError {
    AppError::NoEligibleManager {
        project_id: project_id.to_string(),
        reason: "no active, non-leave manager is assigned to this project".to_string(),
    }
}

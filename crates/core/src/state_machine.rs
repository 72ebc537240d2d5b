//! Canonical job status transitions.
//!
//! ```text
//! pending -> running -> completed
//!                    -> failed
//! ```
//!
//! The lifecycle engine does not enforce this graph on run requests (a
//! running or finished job may be re-triggered); it uses these helpers to
//! detect and log such re-entry.

use crate::status::JobStatus;

/// Returns the set of statuses reachable from `from` in one step.
///
/// Terminal states (Completed, Failed) return an empty slice.
pub fn valid_transitions(from: JobStatus) -> &'static [JobStatus] {
    match from {
        JobStatus::Pending => &[JobStatus::Running],
        JobStatus::Running => &[JobStatus::Completed, JobStatus::Failed],
        JobStatus::Completed | JobStatus::Failed => &[],
    }
}

/// Check whether a transition from `from` to `to` is canonical.
pub fn can_transition(from: JobStatus, to: JobStatus) -> bool {
    valid_transitions(from).contains(&to)
}

/// Whether `status` has no outgoing transitions.
pub fn is_terminal(status: JobStatus) -> bool {
    valid_transitions(status).is_empty()
}

/// Validate a transition, returning a message for non-canonical ones.
pub fn validate_transition(from: JobStatus, to: JobStatus) -> Result<(), String> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(format!("Invalid transition: {from} -> {to}"))
    }
}

//! The `Job` entity, its submission input, and listing filters.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::status::{JobStatus, Priority};
use crate::types::{DbId, Timestamp};

/// Entity name used in not-found errors.
pub const JOB_ENTITY: &str = "Job";

/// A tracked unit of work.
///
/// Only `status` and `webhook_log` change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: DbId,
    pub task_name: String,
    pub payload: serde_json::Value,
    pub priority: Priority,
    pub status: JobStatus,
    /// Serialized response body of the last successful webhook delivery.
    pub webhook_log: Option<String>,
    pub created_at: Timestamp,
}

/// Raw submission input, as received from a caller.
///
/// Every field is optional here so that missing values surface as
/// [`CoreError::Validation`] from [`SubmitJob::validate`] rather than as
/// deserialization failures.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitJob {
    pub task_name: Option<String>,
    pub payload: Option<serde_json::Value>,
    pub priority: Option<String>,
}

/// Validated submission, ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub task_name: String,
    pub payload: serde_json::Value,
    pub priority: Priority,
}

impl SubmitJob {
    /// Validate the raw input and apply the `Medium` priority default.
    ///
    /// A `payload` of JSON `null` counts as missing; any other value,
    /// including `{}`, `[]`, `0` and `false`, is accepted.
    pub fn validate(self) -> Result<NewJob, CoreError> {
        let task_name = validate_task_name(self.task_name)?;

        let payload = match self.payload {
            None | Some(serde_json::Value::Null) => {
                return Err(CoreError::Validation("payload is required".to_string()));
            }
            Some(value) => value,
        };

        let priority = match self.priority.as_deref() {
            None => Priority::default(),
            Some(label) => label.parse()?,
        };

        Ok(NewJob {
            task_name,
            payload,
            priority,
        })
    }
}

/// Validate that a task name is present and not blank.
pub fn validate_task_name(task_name: Option<String>) -> Result<String, CoreError> {
    match task_name {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(CoreError::Validation("taskName is required".to_string())),
    }
}

/// Parse a job id supplied as text (e.g. a path segment).
pub fn parse_job_id(raw: &str) -> Result<DbId, CoreError> {
    raw.trim()
        .parse::<DbId>()
        .map_err(|_| CoreError::Validation("Invalid job id".to_string()))
}

/// Exact-match filters for listing jobs. `None` matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub status: Option<JobStatus>,
    pub priority: Option<Priority>,
}

impl JobFilter {
    /// Whether `job` satisfies every set filter.
    pub fn matches(&self, job: &Job) -> bool {
        self.status.map_or(true, |s| s == job.status)
            && self.priority.map_or(true, |p| p == job.priority)
    }
}

/// Immediate acknowledgment returned by a run request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TriggerAck {
    pub accepted: bool,
    pub id: DbId,
}

impl TriggerAck {
    pub fn accepted(id: DbId) -> Self {
        Self { accepted: true, id }
    }
}

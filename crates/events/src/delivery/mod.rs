//! External delivery channels for job-completion notifications.

pub mod webhook;

use async_trait::async_trait;
use jobrelay_core::job::Job;
use jobrelay_core::status::Priority;
use jobrelay_core::types::{DbId, Timestamp};
use serde::Serialize;

use self::webhook::WebhookError;

/// Body of a completion notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCompletedPayload {
    /// Sent as `jobId`, the key existing receivers read.
    pub job_id: DbId,
    pub task_name: String,
    pub priority: Priority,
    pub payload: serde_json::Value,
    pub completed_at: Timestamp,
}

impl JobCompletedPayload {
    /// Build the notification for a job that has just been completed.
    pub fn for_job(job: &Job, completed_at: Timestamp) -> Self {
        Self {
            job_id: job.id,
            task_name: job.task_name.clone(),
            priority: job.priority,
            payload: job.payload.clone(),
            completed_at,
        }
    }
}

/// Delivers completion notifications to an external receiver.
///
/// Returns the receiver's response body on success. Implementations make a
/// single attempt; there is no retry.
#[async_trait]
pub trait CompletionNotifier: Send + Sync {
    async fn deliver(
        &self,
        url: &str,
        payload: &JobCompletedPayload,
    ) -> Result<serde_json::Value, WebhookError>;
}

#[cfg(test)]
mod tests {
    use jobrelay_core::status::JobStatus;

    use super::*;

    #[test]
    fn payload_uses_camel_case_keys() {
        let job = Job {
            id: 1,
            task_name: "send-email".into(),
            payload: serde_json::json!({"to": "a@b.com"}),
            priority: Priority::High,
            status: JobStatus::Completed,
            webhook_log: None,
            created_at: chrono::Utc::now(),
        };
        let completed_at = chrono::Utc::now();

        let value = serde_json::to_value(JobCompletedPayload::for_job(&job, completed_at)).unwrap();

        assert_eq!(value["jobId"], 1);
        assert_eq!(value["taskName"], "send-email");
        assert_eq!(value["priority"], "High");
        assert_eq!(value["payload"]["to"], "a@b.com");
        assert_eq!(
            value["completedAt"],
            serde_json::to_value(completed_at).unwrap()
        );
    }
}

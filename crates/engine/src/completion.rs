//! Deferred completion task.
//!
//! Spawned by [`JobEngine::trigger`](crate::JobEngine::trigger) with an
//! immutable configuration snapshot. Each step writes only after the
//! previous write has been acknowledged by the store, so per job the order
//! is always `running` < `completed`/`failed` < `webhook_log`.
//!
//! Nothing inside the task propagates to a caller: failures end up in the
//! job record and the logs, and in the returned [`CompletionOutcome`].

use std::sync::Arc;

use chrono::Utc;
use jobrelay_core::status::JobStatus;
use jobrelay_core::types::DbId;
use jobrelay_events::{CompletionNotifier, JobCompletedPayload};

use crate::config::EngineConfig;
use crate::store::JobStore;

/// How a completion task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Marked completed; no webhook receiver is configured.
    CompletedWithoutWebhook,
    /// Marked completed and the receiver's response stored in `webhook_log`.
    Delivered,
    /// Marked completed; the webhook call failed.
    DeliveryFailed,
    /// Marked completed and delivered, but the response could not be stored.
    LogNotRecorded,
    /// The `completed` write failed and the job was marked failed instead.
    Failed,
    /// Nothing could be recorded: the job was removed, or the store refused
    /// both the `completed` and the `failed` write.
    Abandoned,
}

/// One run of the completion sequence for one job.
pub struct CompletionTask {
    job_id: DbId,
    config: Arc<EngineConfig>,
    store: Arc<dyn JobStore>,
    notifier: Arc<dyn CompletionNotifier>,
}

impl CompletionTask {
    pub fn new(
        job_id: DbId,
        config: Arc<EngineConfig>,
        store: Arc<dyn JobStore>,
        notifier: Arc<dyn CompletionNotifier>,
    ) -> Self {
        Self {
            job_id,
            config,
            store,
            notifier,
        }
    }

    /// Wait out the work duration, then complete and notify.
    pub async fn run(self) -> CompletionOutcome {
        tokio::time::sleep(self.config.completion_delay).await;
        let outcome = self.complete().await;
        tracing::debug!(job_id = self.job_id, ?outcome, "Completion task finished");
        outcome
    }

    /// The post-delay sequence: status write, notification, log write.
    pub async fn complete(&self) -> CompletionOutcome {
        let job_id = self.job_id;

        let job = match self.store.update_status(job_id, JobStatus::Completed).await {
            Ok(Some(job)) => job,
            Ok(None) => {
                tracing::warn!(job_id, "Job was removed before it could complete");
                return CompletionOutcome::Abandoned;
            }
            Err(e) => {
                tracing::error!(job_id, error = %e, "Failed to mark job completed");
                return self.mark_failed().await;
            }
        };
        tracing::info!(job_id, task_name = %job.task_name, "Job completed");

        let Some(url) = self.config.webhook_url.as_deref() else {
            tracing::warn!(job_id, "WEBHOOK_URL not set, skipping webhook");
            return CompletionOutcome::CompletedWithoutWebhook;
        };

        let payload = JobCompletedPayload::for_job(&job, Utc::now());
        let body = match self.notifier.deliver(url, &payload).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(job_id, url, error = %e, "Webhook delivery failed");
                return CompletionOutcome::DeliveryFailed;
            }
        };

        match self.store.set_webhook_log(job_id, &body.to_string()).await {
            Ok(Some(_)) => CompletionOutcome::Delivered,
            Ok(None) => {
                tracing::warn!(job_id, "Job was removed before its webhook log was stored");
                CompletionOutcome::LogNotRecorded
            }
            Err(e) => {
                tracing::error!(job_id, error = %e, "Failed to store webhook log");
                CompletionOutcome::LogNotRecorded
            }
        }
    }

    /// Single best-effort `running -> failed` write.
    async fn mark_failed(&self) -> CompletionOutcome {
        let job_id = self.job_id;
        match self.store.update_status(job_id, JobStatus::Failed).await {
            Ok(Some(_)) => {
                tracing::warn!(job_id, "Job marked failed");
                CompletionOutcome::Failed
            }
            Ok(None) => {
                tracing::warn!(job_id, "Job was removed before it could be marked failed");
                CompletionOutcome::Abandoned
            }
            Err(e) => {
                tracing::error!(job_id, error = %e, "Failed to mark job failed; job left running");
                CompletionOutcome::Abandoned
            }
        }
    }
}

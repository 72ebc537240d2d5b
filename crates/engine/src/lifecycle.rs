//! The job lifecycle engine.

use std::sync::Arc;
use std::time::Duration;

use jobrelay_core::error::CoreError;
use jobrelay_core::job::{Job, JobFilter, SubmitJob, TriggerAck, JOB_ENTITY};
use jobrelay_core::state_machine;
use jobrelay_core::status::JobStatus;
use jobrelay_core::types::DbId;
use jobrelay_events::CompletionNotifier;
use tokio_util::task::TaskTracker;

use crate::completion::CompletionTask;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::store::JobStore;

/// Drives jobs from submission through completion and notification.
///
/// Cheap to clone; clones share the store, notifier, configuration, and the
/// tracker of in-flight completion tasks.
#[derive(Clone)]
pub struct JobEngine {
    store: Arc<dyn JobStore>,
    notifier: Arc<dyn CompletionNotifier>,
    config: Arc<EngineConfig>,
    tasks: TaskTracker,
}

impl JobEngine {
    pub fn new(
        store: Arc<dyn JobStore>,
        notifier: Arc<dyn CompletionNotifier>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            config: Arc::new(config),
            tasks: TaskTracker::new(),
        }
    }

    /// Validate and persist a new `pending` job.
    ///
    /// Nothing is written when validation fails.
    pub async fn submit(&self, input: SubmitJob) -> Result<Job, EngineError> {
        let new_job = input.validate()?;
        let job = self.store.create(&new_job).await?;

        tracing::info!(
            job_id = job.id,
            task_name = %job.task_name,
            priority = %job.priority,
            "Job submitted",
        );

        Ok(job)
    }

    /// Mark a job `running` and schedule its deferred completion.
    ///
    /// Returns once the `running` write is durable; the completion task may
    /// not have started yet. Re-triggering a job that is already running or
    /// finished is allowed: it is set back to `running` and a second
    /// completion task is scheduled, and whichever task writes last wins
    /// `status` and `webhook_log`.
    pub async fn trigger(&self, id: DbId) -> Result<TriggerAck, EngineError> {
        let existing = self.store.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

        if let Err(reason) = state_machine::validate_transition(existing.status, JobStatus::Running)
        {
            tracing::warn!(
                job_id = id,
                status = %existing.status,
                %reason,
                "Re-triggering job outside pending state; scheduling a duplicate completion",
            );
        }

        self.store
            .update_status(id, JobStatus::Running)
            .await?
            .ok_or_else(|| not_found(id))?;

        let task = CompletionTask::new(
            id,
            Arc::clone(&self.config),
            Arc::clone(&self.store),
            Arc::clone(&self.notifier),
        );
        self.tasks.spawn(task.run());

        tracing::info!(
            job_id = id,
            delay_ms = self.config.completion_delay.as_millis() as u64,
            "Job started",
        );

        Ok(TriggerAck::accepted(id))
    }

    pub async fn get(&self, id: DbId) -> Result<Job, EngineError> {
        Ok(self.store.find_by_id(id).await?.ok_or_else(|| not_found(id))?)
    }

    /// Snapshot of all jobs matching `filter`, newest first.
    pub async fn list(&self, filter: &JobFilter) -> Result<Vec<Job>, EngineError> {
        Ok(self.store.list(filter).await?)
    }

    /// Delete a job in any status and return the deleted record.
    ///
    /// A pending completion task for the job is not cancelled; its later
    /// writes find no record and it stops.
    pub async fn remove(&self, id: DbId) -> Result<Job, EngineError> {
        let job = self.store.delete(id).await?.ok_or_else(|| not_found(id))?;
        tracing::info!(job_id = id, status = %job.status, "Job removed");
        Ok(job)
    }

    /// Whether the store answers a health probe.
    pub async fn store_healthy(&self) -> bool {
        match self.store.health_check().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Job store health check failed");
                false
            }
        }
    }

    /// Number of completion tasks that have not finished yet.
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Wait up to `timeout` for in-flight completion tasks to finish.
    ///
    /// Tasks are never aborted; returns `false` if some were still running
    /// when the timeout elapsed.
    pub async fn drain(&self, timeout: Duration) -> bool {
        self.tasks.close();
        tokio::time::timeout(timeout, self.tasks.wait()).await.is_ok()
    }
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: JOB_ENTITY,
        id,
    }
}

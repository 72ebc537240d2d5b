//! In-process [`JobStore`] used when no database is configured, and by tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use jobrelay_core::job::{Job, JobFilter, NewJob};
use jobrelay_core::status::JobStatus;
use jobrelay_core::types::DbId;
use tokio::sync::RwLock;

use super::JobStore;
use crate::error::StoreError;

#[derive(Default)]
struct Inner {
    /// Last id handed out. Never rewinds, so deleted ids are not reused.
    last_id: DbId,
    jobs: BTreeMap<DbId, Job>,
}

/// Job store held entirely in memory. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryJobStore {
    inner: RwLock<Inner>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.inner.read().await.jobs.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn create(&self, input: &NewJob) -> Result<Job, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;

        let job = Job {
            id: inner.last_id,
            task_name: input.task_name.clone(),
            payload: input.payload.clone(),
            priority: input.priority,
            status: JobStatus::Pending,
            webhook_log: None,
            created_at: Utc::now(),
        };
        inner.jobs.insert(job.id, job.clone());
        Ok(job)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Job>, StoreError> {
        Ok(self.inner.read().await.jobs.get(&id).cloned())
    }

    async fn list(&self, filter: &JobFilter) -> Result<Vec<Job>, StoreError> {
        let inner = self.inner.read().await;
        let mut jobs: Vec<Job> = inner
            .jobs
            .values()
            .filter(|job| filter.matches(job))
            .cloned()
            .collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(jobs)
    }

    async fn update_status(
        &self,
        id: DbId,
        status: JobStatus,
    ) -> Result<Option<Job>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.jobs.get_mut(&id).map(|job| {
            job.status = status;
            job.clone()
        }))
    }

    async fn set_webhook_log(
        &self,
        id: DbId,
        webhook_log: &str,
    ) -> Result<Option<Job>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.jobs.get_mut(&id).map(|job| {
            job.webhook_log = Some(webhook_log.to_string());
            job.clone()
        }))
    }

    async fn delete(&self, id: DbId) -> Result<Option<Job>, StoreError> {
        Ok(self.inner.write().await.jobs.remove(&id))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

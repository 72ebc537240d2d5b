use async_trait::async_trait;
use jobrelay_core::job::{Job, JobFilter, NewJob};
use jobrelay_core::status::JobStatus;
use jobrelay_core::types::DbId;
use jobrelay_db::repositories::JobRepo;
use jobrelay_db::DbPool;

use super::JobStore;
use crate::error::StoreError;

/// [`JobStore`] backed by the `jobs` table.
#[derive(Clone)]
pub struct PgJobStore {
    pool: DbPool,
}

impl PgJobStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn create(&self, input: &NewJob) -> Result<Job, StoreError> {
        Ok(JobRepo::create(&self.pool, input).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Job>, StoreError> {
        Ok(JobRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list(&self, filter: &JobFilter) -> Result<Vec<Job>, StoreError> {
        Ok(JobRepo::list(&self.pool, filter).await?)
    }

    async fn update_status(
        &self,
        id: DbId,
        status: JobStatus,
    ) -> Result<Option<Job>, StoreError> {
        Ok(JobRepo::update_status(&self.pool, id, status).await?)
    }

    async fn set_webhook_log(
        &self,
        id: DbId,
        webhook_log: &str,
    ) -> Result<Option<Job>, StoreError> {
        Ok(JobRepo::set_webhook_log(&self.pool, id, webhook_log).await?)
    }

    async fn delete(&self, id: DbId) -> Result<Option<Job>, StoreError> {
        Ok(JobRepo::delete(&self.pool, id).await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(jobrelay_db::health_check(&self.pool).await?)
    }
}

//! Persistence seam for the lifecycle engine.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use jobrelay_core::job::{Job, JobFilter, NewJob};
use jobrelay_core::status::JobStatus;
use jobrelay_core::types::DbId;

use crate::error::StoreError;

pub use memory::MemoryJobStore;
pub use postgres::PgJobStore;

/// Durable keyed storage for job records.
///
/// Every write is an independent, unconditional update of one record:
/// there is no compare-and-set, so overlapping writers to the same field
/// resolve as last-write-wins. Updates and deletes return `Ok(None)` when
/// the id does not exist.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Persist a new job in `pending` status with a freshly allocated id.
    async fn create(&self, input: &NewJob) -> Result<Job, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Job>, StoreError>;

    /// Jobs matching `filter`, newest `created_at` first (ties: highest id
    /// first).
    async fn list(&self, filter: &JobFilter) -> Result<Vec<Job>, StoreError>;

    async fn update_status(&self, id: DbId, status: JobStatus)
        -> Result<Option<Job>, StoreError>;

    async fn set_webhook_log(&self, id: DbId, webhook_log: &str)
        -> Result<Option<Job>, StoreError>;

    async fn delete(&self, id: DbId) -> Result<Option<Job>, StoreError>;

    /// Cheap reachability probe.
    async fn health_check(&self) -> Result<(), StoreError>;
}

//! Repository for the `jobs` table.
//!
//! Status and priority are written through their `jobrelay_core::status`
//! lookup ids; rows are converted back into domain [`Job`]s on the way out.

use jobrelay_core::job::{Job, JobFilter, NewJob};
use jobrelay_core::status::JobStatus;
use jobrelay_core::types::DbId;
use sqlx::PgPool;

use crate::models::job::JobRow;

/// Column list for `jobs` queries.
const COLUMNS: &str = "\
    id, task_name, payload, priority_id, status_id, webhook_log, created_at";

/// Provides CRUD and lifecycle writes for jobs.
pub struct JobRepo;

impl JobRepo {
    /// Insert a new pending job and return it.
    pub async fn create(pool: &PgPool, input: &NewJob) -> Result<Job, sqlx::Error> {
        let query = format!(
            "INSERT INTO jobs (task_name, payload, priority_id, status_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JobRow>(&query)
            .bind(&input.task_name)
            .bind(&input.payload)
            .bind(input.priority.id())
            .bind(JobStatus::Pending.id())
            .fetch_one(pool)
            .await?
            .try_into()
    }

    /// Find a job by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, JobRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(Job::try_from)
            .transpose()
    }

    /// List jobs matching `filter`, newest first.
    ///
    /// Ties on `created_at` are broken by descending id so the order is
    /// stable across repeated calls.
    pub async fn list(pool: &PgPool, filter: &JobFilter) -> Result<Vec<Job>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx: u32 = 1;

        if filter.status.is_some() {
            conditions.push(format!("status_id = ${bind_idx}"));
            bind_idx += 1;
        }

        if filter.priority.is_some() {
            conditions.push(format!("priority_id = ${bind_idx}"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM jobs \
             {where_clause} \
             ORDER BY created_at DESC, id DESC"
        );

        let mut q = sqlx::query_as::<_, JobRow>(&query);

        if let Some(status) = filter.status {
            q = q.bind(status.id());
        }
        if let Some(priority) = filter.priority {
            q = q.bind(priority.id());
        }

        q.fetch_all(pool)
            .await?
            .into_iter()
            .map(Job::try_from)
            .collect()
    }

    /// Unconditionally overwrite a job's status.
    ///
    /// Returns `None` if the job does not exist. No transition check is
    /// made here; concurrent writers resolve as last-write-wins.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: JobStatus,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            "UPDATE jobs SET status_id = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JobRow>(&query)
            .bind(id)
            .bind(status.id())
            .fetch_optional(pool)
            .await?
            .map(Job::try_from)
            .transpose()
    }

    /// Store the serialized webhook response on a job.
    ///
    /// Returns `None` if the job does not exist.
    pub async fn set_webhook_log(
        pool: &PgPool,
        id: DbId,
        webhook_log: &str,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            "UPDATE jobs SET webhook_log = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JobRow>(&query)
            .bind(id)
            .bind(webhook_log)
            .fetch_optional(pool)
            .await?
            .map(Job::try_from)
            .transpose()
    }

    /// Delete a job regardless of status, returning the deleted row.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("DELETE FROM jobs WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, JobRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(Job::try_from)
            .transpose()
    }
}

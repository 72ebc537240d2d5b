//! Row model for the `jobs` table.

use jobrelay_core::job::Job;
use jobrelay_core::status::{JobStatus, Priority, StatusId};
use jobrelay_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `jobs` table, with lookup columns still as raw ids.
#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub id: DbId,
    pub task_name: String,
    pub payload: serde_json::Value,
    pub priority_id: StatusId,
    pub status_id: StatusId,
    pub webhook_log: Option<String>,
    pub created_at: Timestamp,
}

impl TryFrom<JobRow> for Job {
    type Error = sqlx::Error;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let status = JobStatus::from_id(row.status_id)
            .ok_or_else(|| decode_error("status_id", row.status_id))?;
        let priority = Priority::from_id(row.priority_id)
            .ok_or_else(|| decode_error("priority_id", row.priority_id))?;

        Ok(Job {
            id: row.id,
            task_name: row.task_name,
            payload: row.payload,
            priority,
            status,
            webhook_log: row.webhook_log,
            created_at: row.created_at,
        })
    }
}

fn decode_error(column: &str, value: StatusId) -> sqlx::Error {
    sqlx::Error::Decode(format!("unknown {column} {value} in jobs row").into())
}

//! Handlers for the `/jobs` resource.
//!
//! Thin adapters over [`JobEngine`](jobrelay_engine::JobEngine): parse the
//! request, call one engine operation, wrap the result.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use jobrelay_core::job::{parse_job_id, JobFilter, SubmitJob};
use jobrelay_core::status::{JobStatus, Priority};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /api/v1/jobs`.
#[derive(Debug, Default, Deserialize)]
pub struct JobListQuery {
    /// Exact status filter (`pending`, `running`, `completed`, `failed`).
    pub status: Option<String>,
    /// Exact priority filter (`Low`, `Medium`, `High`).
    pub priority: Option<String>,
}

impl JobListQuery {
    /// Parse the raw query values into a [`JobFilter`]. Blank values are
    /// ignored.
    pub fn into_filter(self) -> AppResult<JobFilter> {
        let status = non_blank(self.status)
            .map(|s| s.parse::<JobStatus>())
            .transpose()?;
        let priority = non_blank(self.priority)
            .map(|p| p.parse::<Priority>())
            .transpose()?;
        Ok(JobFilter { status, priority })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

/// POST /api/v1/jobs
///
/// Create a new job in `pending` status. Returns 201 with the created job.
pub async fn create_job(
    State(state): State<AppState>,
    body: Result<Json<SubmitJob>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let job = state.engine.submit(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: job })))
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs
///
/// List jobs newest first, optionally filtered by `status` and `priority`.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobListQuery>,
) -> AppResult<impl IntoResponse> {
    let filter = params.into_filter()?;
    let jobs = state.engine.list(&filter).await?;
    Ok(Json(DataResponse { data: jobs }))
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs/{id}
pub async fn get_job(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let job = state.engine.get(parse_job_id(&raw_id)?).await?;
    Ok(Json(DataResponse { data: job }))
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// DELETE /api/v1/jobs/{id}
///
/// Delete a job in any status. Returns the deleted record.
pub async fn delete_job(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let job = state.engine.remove(parse_job_id(&raw_id)?).await?;
    Ok(Json(DataResponse { data: job }))
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// POST /api/v1/jobs/{id}/run
///
/// Mark the job `running` and schedule its completion. Returns 202 as soon
/// as the `running` status is stored; completion and the webhook call
/// happen in the background.
pub async fn run_job(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let ack = state.engine.trigger(parse_job_id(&raw_id)?).await?;
    Ok((StatusCode::ACCEPTED, Json(DataResponse { data: ack })))
}

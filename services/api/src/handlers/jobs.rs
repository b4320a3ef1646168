//! Job tracking handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use jobtrack_db::{CreateJob, JobRepository, JobRow};

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub employer: String,
    pub callout_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub id: Uuid,
    pub title: String,
    pub employer: String,
    pub callout_url: Option<String>,
    pub application_time: Option<String>,
    pub created_at: String,
}

impl From<JobRow> for JobResponse {
    fn from(row: JobRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            employer: row.employer,
            callout_url: row.callout_url,
            application_time: row.application_time.map(|t| t.to_rfc3339()),
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

/// GET /jobs
///
/// All jobs belonging to the authenticated subject
pub async fn list_jobs(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<Vec<JobResponse>>> {
    let jobs = state
        .repos
        .jobs
        .find_all(auth_user.login.as_str())
        .await?
        .into_iter()
        .map(JobResponse::from)
        .collect();

    Ok(Json(jobs))
}

/// POST /jobs
pub async fn create_job(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(req): Json<CreateJobRequest>,
) -> ApiResult<(StatusCode, Json<JobResponse>)> {
    if req.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title is required".to_string()));
    }
    if req.employer.trim().is_empty() {
        return Err(ApiError::BadRequest("employer is required".to_string()));
    }

    let job = state
        .repos
        .jobs
        .create(CreateJob {
            id: Uuid::new_v4(),
            user_login: auth_user.login.to_string(),
            title: req.title,
            employer: req.employer,
            callout_url: req.callout_url,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(job.into())))
}

/// GET /jobs/{id}
pub async fn get_job(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<JobResponse>> {
    let job = state
        .repos
        .jobs
        .find_by_id(auth_user.login.as_str(), id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(job.into()))
}

/// DELETE /jobs/{id}
pub async fn delete_job(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .repos
        .jobs
        .delete(auth_user.login.as_str(), id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /jobs/{id}/apply
///
/// Stamp the job as applied-to now
pub async fn apply_to_job(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<JobResponse>> {
    let job = state
        .repos
        .jobs
        .mark_applied(auth_user.login.as_str(), id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(job.into()))
}

// src/handlers/jobs.rs

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::job::{Job, UpdateJobStatusPayload, UploadMediaQuery},
};

// Fresh fetch of the job, limited to locations the caller belongs to.
async fn visible_job(
    app_state: &AppState,
    user: &AuthenticatedUser,
    raw_id: &str,
) -> Result<Job, AppError> {
    let job = app_state
        .job_service
        .load(raw_id)
        .await?
        .ok_or(AppError::JobNotFound)?;

    let session = app_state.session_service.current(&user.0).await;
    if session.profile.membership(job.location_id).is_none() {
        return Err(AppError::JobNotFound);
    }

    Ok(job)
}

// GET /api/jobs/{job_id}
pub async fn get_job(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(job_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let job = visible_job(&app_state, &user, &job_id).await?;
    Ok(Json(job))
}

// PATCH /api/jobs/{job_id}/status
pub async fn update_job_status(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(job_id): Path<String>,
    Json(payload): Json<UpdateJobStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let job = visible_job(&app_state, &user, &job_id).await?;

    app_state.job_service.update_status(job.id, &payload.status).await?;
    app_state.session_service.refresh(&user.0).await;

    let job = visible_job(&app_state, &user, &job_id).await?;
    Ok(Json(job))
}

// POST /api/jobs/{job_id}/media?media_type=...&file_name=...
// The request body is the raw file.
pub async fn upload_media(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(job_id): Path<String>,
    Query(query): Query<UploadMediaQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    query.validate()?;
    let job = visible_job(&app_state, &user, &job_id).await?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/octet-stream");

    let media = app_state
        .job_service
        .attach_media(job.id, &query, content_type, body.to_vec())
        .await?;
    app_state.session_service.refresh(&user.0).await;

    Ok((StatusCode::CREATED, Json(media)))
}

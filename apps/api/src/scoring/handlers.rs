//! Axum route handlers for the ask and job-matching APIs.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{JobPosting, JobRecord};
use crate::scoring::{answer_query, match_job, resolve_limit, AskResponse, JobMatchResponse};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub query: String,
    pub k: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MatchRequest {
    pub top_n: Option<i64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/ask
///
/// Ranks all stored resumes against a free-text question.
pub async fn handle_ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    let k = resolve_limit(request.k, state.catalog.tuning.default_ask_results);
    let resumes = state.store.snapshot().await?;
    let response = answer_query(&request.query, k, &resumes, &state.catalog)?;

    info!(
        k,
        total = response.total_resumes,
        hits = response.evidence.len(),
        "Answered query"
    );
    Ok(Json(response))
}

/// POST /api/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(posting): Json<JobPosting>,
) -> Result<(StatusCode, Json<JobRecord>), AppError> {
    let job = JobRecord::new(posting.normalized()?);
    state.store.insert_job(job.clone()).await?;
    info!(job_id = %job.id, title = %job.posting.title, "Created job");
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobRecord>, AppError> {
    state
        .store
        .get_job(job_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

/// POST /api/jobs/:id/match
///
/// Ranks all stored resumes against the job's preferred skills and requirements.
/// The body is optional; `top_n` defaults to 5.
pub async fn handle_match_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    request: Option<Json<MatchRequest>>,
) -> Result<Json<JobMatchResponse>, AppError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let job = state
        .store
        .get_job(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let top_n = resolve_limit(request.top_n, state.catalog.tuning.default_match_results);
    let resumes = state.store.snapshot().await?;
    let response = match_job(&job.posting, top_n, &resumes, &state.catalog);

    info!(
        job_id = %job_id,
        top_n,
        matches = response.matches.len(),
        "Matched job"
    );
    Ok(Json(response))
}

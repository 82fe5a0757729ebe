//! Axum route handlers for resume upload and lookup.

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::ingest::{parse_batch, FileOutcome, UploadedFile};
use crate::models::resume::ResumeRecord;
use crate::state::AppState;
use crate::store::{ListQuery, ResumePage};

/// Multipart field carrying the resume files.
pub const UPLOAD_FIELD: &str = "resumes";
pub const MAX_FILES_PER_BATCH: usize = 10;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ParsedPreview {
    pub name: String,
    pub skills: Vec<String>,
    /// Number of experience entries found.
    pub experience: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedUpload {
    pub id: Uuid,
    pub original_name: String,
    pub parsed_data: ParsedPreview,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedUpload {
    pub original_name: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UploadResult {
    Parsed(ParsedUpload),
    Failed(FailedUpload),
}

#[derive(Debug, Serialize)]
pub struct BatchUploadResponse {
    pub success: bool,
    pub message: String,
    pub resumes: Vec<UploadResult>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/resumes
///
/// Accepts up to 10 files in the `resumes` multipart field. Every file gets
/// its own outcome; a bad file never fails the batch.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BatchUploadResponse>, AppError> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read '{file_name}': {e}")))?;
        files.push(UploadedFile { file_name, data });

        if files.len() > MAX_FILES_PER_BATCH {
            return Err(AppError::Validation(format!(
                "At most {MAX_FILES_PER_BATCH} files per upload"
            )));
        }
    }

    if files.is_empty() {
        return Err(AppError::Validation(format!(
            "No files found in multipart field '{UPLOAD_FIELD}'"
        )));
    }

    let file_count = files.len();
    let catalog = state.catalog.clone();
    let max_bytes = state.config.max_upload_bytes;
    let outcomes = tokio::task::spawn_blocking(move || parse_batch(files, &catalog, max_bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Resume parsing task failed: {e}")))?;

    let mut resumes = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            FileOutcome::Parsed(record) => {
                resumes.push(UploadResult::Parsed(ParsedUpload {
                    id: record.id,
                    original_name: record.original_name.clone(),
                    parsed_data: ParsedPreview {
                        name: record.parsed_data.name.clone(),
                        skills: record.parsed_data.skills.clone(),
                        experience: record.parsed_data.experience.len(),
                    },
                }));
                state.store.insert_resume(record).await?;
            }
            FileOutcome::Failed {
                original_name,
                error,
            } => resumes.push(UploadResult::Failed(FailedUpload {
                original_name,
                error: error.to_string(),
            })),
        }
    }

    info!(files = file_count, "Processed upload batch");
    Ok(Json(BatchUploadResponse {
        success: true,
        message: format!("Processed {file_count} resumes"),
        resumes,
    }))
}

/// GET /api/resumes?limit=&offset=&q=
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ResumePage>, AppError> {
    Ok(Json(state.store.list_resumes(&params).await?))
}

/// GET /api/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<ResumeRecord>, AppError> {
    state
        .store
        .get_resume(resume_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))
}

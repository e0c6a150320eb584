//! Axum route handlers for the Resumes API.
//!
//! Callers are authenticated upstream; `user_id` arrives as a query parameter and
//! scopes every read and write.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::analysis::career_docs::{generate_career_doc, resume_context, CareerDoc, CareerDocKind};
use crate::errors::AppError;
use crate::extraction::upload::UploadFile;
use crate::models::resume::{ResumeDetail, ResumeSummary};
use crate::resumes::pipeline::{process_upload, UploadOutcome};
use crate::state::AppState;

/// Multipart field carrying the PDF.
const FILE_FIELD: &str = "file";
const DEFAULT_FILE_NAME: &str = "resume.pdf";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CareerDocRequest {
    pub job_description: String,
    pub kind: CareerDocKind,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes
///
/// Extracts, analyzes and stores one uploaded resume.
pub async fn handle_upload(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<UploadOutcome>), AppError> {
    let file = read_file_field(multipart).await?;
    info!(user_id = %params.user_id, received = file.is_some(), "Resume upload received");

    let outcome = process_upload(
        state.extractor.clone(),
        state.analyzer.as_ref(),
        state.store.as_ref(),
        params.user_id,
        file,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(outcome)))
}

/// GET /api/v1/resumes
pub async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ResumeSummary>>, AppError> {
    let resumes = state.store.list_for_user(params.user_id).await?;
    Ok(Json(resumes))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ResumeDetail>, AppError> {
    let detail = find_resume(&state, params.user_id, id).await?;
    Ok(Json(detail))
}

/// POST /api/v1/resumes/:id/career-docs
///
/// Generates a cover letter or interview prep for a job description.
pub async fn handle_career_doc(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
    Json(request): Json<CareerDocRequest>,
) -> Result<Json<CareerDoc>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let detail = find_resume(&state, params.user_id, id).await?;
    let context = resume_context(Some(detail.resume.content.as_str()), detail.analysis.as_ref());

    let doc = generate_career_doc(
        state.analyzer.as_ref(),
        request.kind,
        &request.job_description,
        &context,
    )
    .await?;

    Ok(Json(doc))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn find_resume(state: &AppState, user_id: Uuid, id: Uuid) -> Result<ResumeDetail, AppError> {
    state
        .store
        .get_for_user(user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

/// Pulls the `file` field out of the form; other fields are ignored.
async fn read_file_field(mut multipart: Multipart) -> Result<Option<UploadFile>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_FILE_NAME)
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read uploaded file: {e}")))?;

        return Ok(Some(UploadFile { file_name, bytes }));
    }

    Ok(None)
}

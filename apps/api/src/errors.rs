use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::analysis::analyzer::AnalysisError;
use crate::extraction::upload::UploadError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("LLM error: {0}")]
    Llm(#[from] AnalysisError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Upload(e) => upload_parts(e),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "ANALYSIS_FAILED",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        }
    }
}

fn upload_parts(e: &UploadError) -> (StatusCode, &'static str, String) {
    match e {
        UploadError::EmptyOrMissingFile => (StatusCode::BAD_REQUEST, "EMPTY_FILE", e.to_string()),
        UploadError::Extraction(msg) => {
            tracing::warn!("Extraction error: {msg}");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_FAILED",
                "The file could not be read as a PDF".to_string(),
            )
        }
        UploadError::UnreadableContent { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "UNREADABLE_CONTENT",
            e.to_string(),
        ),
        UploadError::DownstreamAnalysis(msg) => {
            tracing::error!("Analysis error: {msg}");
            (
                StatusCode::BAD_GATEWAY,
                "ANALYSIS_FAILED",
                "Analysis failed, please try again".to_string(),
            )
        }
        UploadError::Persistence(msg) => {
            tracing::error!("Persistence error: {msg}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PERSISTENCE_FAILED",
                "Your resume was analyzed but could not be saved, please try again".to_string(),
            )
        }
    }
}

fn error_body(code: &str, message: String, hint: Option<&str>) -> Value {
    let mut error = json!({
        "code": code,
        "message": message,
    });
    if let Some(hint) = hint {
        error["hint"] = json!(hint);
    }
    json!({ "error": error })
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let hint = match &self {
            AppError::Upload(e) => e.hint(),
            _ => None,
        };

        (status, Json(error_body(code, message, hint))).into_response()
    }
}

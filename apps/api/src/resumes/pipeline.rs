//! Upload pipeline: extract, analyze, persist. Each stage awaits the previous one
//! and any failure aborts the upload with nothing stored.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::analysis::analyzer::ResumeAnalyzer;
use crate::analysis::models::AnalysisResult;
use crate::extraction::pdf::PageExtractor;
use crate::extraction::upload::{validate_upload, UploadError, UploadFile};
use crate::resumes::store::{NewResume, ResumeStore};

#[derive(Debug, Serialize)]
pub struct UploadOutcome {
    pub id: Uuid,
    pub file_name: String,
    pub analysis: AnalysisResult,
}

pub async fn process_upload(
    extractor: Arc<dyn PageExtractor>,
    analyzer: &dyn ResumeAnalyzer,
    store: &dyn ResumeStore,
    user_id: Uuid,
    file: Option<UploadFile>,
) -> Result<UploadOutcome, UploadError> {
    let file_name = file
        .as_ref()
        .map(|f| f.file_name.clone())
        .unwrap_or_default();

    // PDF parsing is CPU-bound; keep it off the async workers.
    let document = tokio::task::spawn_blocking(move || validate_upload(&*extractor, file.as_ref()))
        .await
        .map_err(|e| UploadError::Extraction(format!("extraction task failed: {e}")))??;

    let analysis = analyzer
        .analyze(&document.normalized_text)
        .await
        .map_err(|e| {
            error!(%user_id, "Resume analysis failed: {e}");
            UploadError::DownstreamAnalysis(e.to_string())
        })?;

    let id = store
        .insert(NewResume {
            user_id,
            file_name: &file_name,
            content: &document.normalized_text,
            analysis: &analysis,
        })
        .await
        .map_err(|e| {
            error!(%user_id, "Resume persistence failed: {e:?}");
            UploadError::Persistence(e.to_string())
        })?;

    info!(%user_id, resume_id = %id, ats_score = analysis.ats_score, "Resume processed");
    Ok(UploadOutcome {
        id,
        file_name,
        analysis,
    })
}

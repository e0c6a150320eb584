use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::extraction::assemble::{assemble, AssembledDocument, MIN_READABLE_CHARS};
use crate::extraction::fragments::render_page;
use crate::extraction::pdf::PageExtractor;

/// Shown to users whose upload had no extractable text.
pub const UNREADABLE_HINT: &str =
    "This is usually a scanned or image-only resume. Re-export it as a text-based PDF.";

/// A file received from the upload form.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Everything that can stop an upload. Every stage fails fast; nothing is retried.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No valid file uploaded")]
    EmptyOrMissingFile,

    #[error("Could not read the document: {0}")]
    Extraction(String),

    #[error("No readable text found in PDF")]
    UnreadableContent { hint: &'static str },

    #[error("Resume analysis failed: {0}")]
    DownstreamAnalysis(String),

    #[error("Failed to save resume: {0}")]
    Persistence(String),
}

impl UploadError {
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            UploadError::UnreadableContent { hint } => Some(*hint),
            _ => None,
        }
    }
}

/// Extracts, assembles and checks an uploaded document.
///
/// Runs synchronously; callers on the async runtime should move it onto a
/// blocking thread since PDF parsing is CPU-bound.
pub fn validate_upload(
    extractor: &dyn PageExtractor,
    file: Option<&UploadFile>,
) -> Result<AssembledDocument, UploadError> {
    let file = match file {
        Some(f) if !f.bytes.is_empty() => f,
        _ => return Err(UploadError::EmptyOrMissingFile),
    };

    let pages = extractor
        .extract(&file.bytes)
        .map_err(|e| UploadError::Extraction(e.to_string()))?;
    let page_count = pages.len();

    let texts: Vec<String> = pages.into_iter().map(render_page).collect();
    let document = assemble(&texts);
    debug!(
        raw_chars = document.raw_text.len(),
        normalized_chars = document.normalized_text.len(),
        "Document assembled"
    );

    if !document.is_readable() {
        warn!(
            file_name = %file.file_name,
            chars = document.normalized_text.len(),
            min = MIN_READABLE_CHARS,
            "Upload has too little text"
        );
        return Err(UploadError::UnreadableContent {
            hint: UNREADABLE_HINT,
        });
    }

    info!(
        file_name = %file.file_name,
        pages = page_count,
        chars = document.normalized_text.len(),
        "Resume text extracted"
    );
    Ok(document)
}

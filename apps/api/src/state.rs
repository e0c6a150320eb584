use std::sync::Arc;

use crate::analysis::analyzer::ResumeAnalyzer;
use crate::extraction::pdf::PageExtractor;
use crate::resumes::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// PDF → per-page fragments. Default: `PdfPageExtractor`.
    pub extractor: Arc<dyn PageExtractor>,
    /// Resume scoring and career document generation. Default: `LlmResumeAnalyzer`.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
    pub store: Arc<dyn ResumeStore>,
}

use serde::{Deserialize, Serialize};

/// Structured ATS feedback for one resume.
///
/// Only the shape is checked; score range and list contents are taken as the
/// model returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ats_score: f64,
    #[serde(default)]
    pub summary_feedback: String,
    #[serde(default)]
    pub skills_found: Vec<String>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub formatting_issues: Vec<String>,
}

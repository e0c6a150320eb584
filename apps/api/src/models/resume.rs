use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::analysis::models::AnalysisResult;

/// A stored upload. Rows are written once and never edited.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub user_id: Uuid,
    pub ats_score: f64,
    pub summary_feedback: String,
    pub skills_found: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub formatting_issues: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AnalysisRow> for AnalysisResult {
    fn from(row: AnalysisRow) -> Self {
        AnalysisResult {
            ats_score: row.ats_score,
            summary_feedback: row.summary_feedback,
            skills_found: row.skills_found,
            missing_keywords: row.missing_keywords,
            formatting_issues: row.formatting_issues,
        }
    }
}

/// Dashboard listing entry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeSummary {
    pub id: Uuid,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
    pub ats_score: Option<f64>,
}

/// A resume together with its analysis, if one was stored.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeDetail {
    pub resume: ResumeRow,
    pub analysis: Option<AnalysisResult>,
}

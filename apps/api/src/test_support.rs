//! Test doubles for the extractor, analyzer and store seams.

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::analysis::analyzer::{AnalysisError, ResumeAnalyzer};
use crate::analysis::models::AnalysisResult;
use crate::extraction::fragments::{PageFragments, TextFragment};
use crate::extraction::pdf::{ExtractionError, PageExtractor};
use crate::llm_client::LlmError;
use crate::models::resume::{ResumeDetail, ResumeRow, ResumeSummary};
use crate::resumes::store::{NewResume, ResumeStore};

pub fn sample_analysis() -> AnalysisResult {
    AnalysisResult {
        ats_score: 78.0,
        summary_feedback: "Strong systems background; add measurable outcomes.".to_string(),
        skills_found: vec!["Rust".to_string(), "PostgreSQL".to_string()],
        missing_keywords: vec!["Kubernetes".to_string()],
        formatting_issues: vec![],
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extractor
// ────────────────────────────────────────────────────────────────────────────

/// Returns the same single page for any input.
pub struct FixedExtractor {
    fragments: Vec<TextFragment>,
}

impl FixedExtractor {
    pub fn single_line(text: &str) -> Self {
        Self {
            fragments: vec![TextFragment::new(text, 700.0)],
        }
    }
}

impl PageExtractor for FixedExtractor {
    fn extract(&self, _bytes: &[u8]) -> Result<Vec<PageFragments>, ExtractionError> {
        Ok(vec![Ok(self.fragments.clone())])
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Analyzer
// ────────────────────────────────────────────────────────────────────────────

pub struct StubAnalyzer {
    analysis: Option<AnalysisResult>,
    reply: String,
    seen_text_len: Mutex<Option<usize>>,
}

impl StubAnalyzer {
    pub fn ok(analysis: AnalysisResult) -> Self {
        Self {
            analysis: Some(analysis),
            reply: String::new(),
            seen_text_len: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            analysis: None,
            reply: String::new(),
            seen_text_len: Mutex::new(None),
        }
    }

    pub fn with_reply(mut self, reply: &str) -> Self {
        self.reply = reply.to_string();
        self
    }

    /// Length of the text passed to the last `analyze` call.
    pub fn seen_text_len(&self) -> Option<usize> {
        *self.seen_text_len.lock().unwrap()
    }
}

#[async_trait]
impl ResumeAnalyzer for StubAnalyzer {
    async fn analyze(&self, resume_text: &str) -> Result<AnalysisResult, AnalysisError> {
        *self.seen_text_len.lock().unwrap() = Some(resume_text.len());
        self.analysis.clone().ok_or(AnalysisError::Llm(LlmError::EmptyContent))
    }

    async fn generate(&self, _prompt: &str) -> Result<String, AnalysisError> {
        Ok(self.reply.clone())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Stores
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryResumeStore {
    records: Mutex<Vec<(ResumeRow, AnalysisResult)>>,
}

impl MemoryResumeStore {
    pub fn is_empty(&self) -> bool {
        self.records.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl ResumeStore for MemoryResumeStore {
    async fn insert(&self, record: NewResume<'_>) -> Result<Uuid> {
        let row = ResumeRow {
            id: Uuid::new_v4(),
            user_id: record.user_id,
            file_name: record.file_name.to_string(),
            content: record.content.to_string(),
            created_at: Utc::now(),
        };
        let id = row.id;
        self.records
            .lock()
            .unwrap()
            .push((row, record.analysis.clone()));
        Ok(id)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ResumeSummary>> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .rev()
            .filter(|(row, _)| row.user_id == user_id)
            .map(|(row, analysis)| ResumeSummary {
                id: row.id,
                file_name: row.file_name.clone(),
                created_at: row.created_at,
                ats_score: Some(analysis.ats_score),
            })
            .collect())
    }

    async fn get_for_user(&self, user_id: Uuid, resume_id: Uuid) -> Result<Option<ResumeDetail>> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .find(|(row, _)| row.id == resume_id && row.user_id == user_id)
            .map(|(row, analysis)| ResumeDetail {
                resume: row.clone(),
                analysis: Some(analysis.clone()),
            }))
    }
}

/// Store whose every call fails, as a database outage would.
pub struct FailingStore;

#[async_trait]
impl ResumeStore for FailingStore {
    async fn insert(&self, _record: NewResume<'_>) -> Result<Uuid> {
        Err(anyhow!("connection refused"))
    }

    async fn list_for_user(&self, _user_id: Uuid) -> Result<Vec<ResumeSummary>> {
        Err(anyhow!("connection refused"))
    }

    async fn get_for_user(&self, _user_id: Uuid, _resume_id: Uuid) -> Result<Option<ResumeDetail>> {
        Err(anyhow!("connection refused"))
    }
}

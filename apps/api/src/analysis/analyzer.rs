//! Analyzer: pluggable boundary between extracted resume text and the model.
//!
//! `AppState` holds an `Arc<dyn ResumeAnalyzer>`; production uses
//! `LlmResumeAnalyzer`, tests swap in canned replies.

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::analysis::models::AnalysisResult;
use crate::analysis::prompts::{ANALYZE_PROMPT_TEMPLATE, ANALYZE_SYSTEM};
use crate::llm_client::prompts::PROSE_SYSTEM;
use crate::llm_client::{parse_json_reply, LlmClient, LlmError};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("model reply did not match the expected format: {0}")]
    InvalidReply(String),
}

#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    /// Scores normalized resume text.
    async fn analyze(&self, resume_text: &str) -> Result<AnalysisResult, AnalysisError>;

    /// Runs a free-text prompt and returns the model's raw reply.
    async fn generate(&self, prompt: &str) -> Result<String, AnalysisError>;
}

pub struct LlmResumeAnalyzer(pub LlmClient);

#[async_trait]
impl ResumeAnalyzer for LlmResumeAnalyzer {
    async fn analyze(&self, resume_text: &str) -> Result<AnalysisResult, AnalysisError> {
        let prompt = build_analyze_prompt(resume_text);
        let reply = self.0.call_text(&prompt, ANALYZE_SYSTEM).await?;
        let result = parse_analysis(&reply)?;
        info!(ats_score = result.ats_score, "Resume analyzed");
        Ok(result)
    }

    async fn generate(&self, prompt: &str) -> Result<String, AnalysisError> {
        Ok(self.0.call_text(prompt, PROSE_SYSTEM).await?)
    }
}

pub fn build_analyze_prompt(resume_text: &str) -> String {
    ANALYZE_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}

/// Parses a scoring reply; anything that is not the declared JSON shape is rejected.
pub fn parse_analysis(reply: &str) -> Result<AnalysisResult, AnalysisError> {
    parse_json_reply(reply).map_err(|e| AnalysisError::InvalidReply(e.to_string()))
}

//! Career documents: job-specific cover letters and interview prep built from a
//! stored resume.
//!
//! The reply format is chosen by the requested `CareerDocKind`; the model's
//! output is never sniffed to decide what it is.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::analyzer::{AnalysisError, ResumeAnalyzer};
use crate::analysis::models::AnalysisResult;
use crate::analysis::prompts::{COVER_LETTER_PROMPT_TEMPLATE, INTERVIEW_PREP_PROMPT_TEMPLATE};
use crate::llm_client::parse_json_reply;

/// Used when a resume has neither stored text nor an analysis.
pub const FALLBACK_CONTEXT: &str = "User resume data.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerDocKind {
    CoverLetter,
    InterviewPrep,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CareerDoc {
    CoverLetter { text: String },
    InterviewPrep { questions: Vec<InterviewQuestion> },
}

#[derive(Debug, Deserialize)]
struct InterviewPrepReply {
    questions: Vec<InterviewQuestion>,
}

/// Picks the background text sent to the model: stored resume text first, then
/// the serialized analysis, then a placeholder.
pub fn resume_context(content: Option<&str>, analysis: Option<&AnalysisResult>) -> String {
    if let Some(text) = content.filter(|t| !t.trim().is_empty()) {
        return text.to_string();
    }
    analysis
        .and_then(|a| serde_json::to_string(a).ok())
        .unwrap_or_else(|| FALLBACK_CONTEXT.to_string())
}

pub fn build_career_prompt(kind: CareerDocKind, job_description: &str, context: &str) -> String {
    let template = match kind {
        CareerDocKind::CoverLetter => COVER_LETTER_PROMPT_TEMPLATE,
        CareerDocKind::InterviewPrep => INTERVIEW_PREP_PROMPT_TEMPLATE,
    };
    fill_template(template, job_description, context)
}

/// Substitutes both placeholders in one pass, so text supplied for one is never
/// scanned for the other.
fn fill_template(template: &str, job_description: &str, context: &str) -> String {
    let mut out = String::with_capacity(template.len() + job_description.len() + context.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix("{job_description}") {
            out.push_str(job_description);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{context}") {
            out.push_str(context);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}

pub fn parse_career_reply(kind: CareerDocKind, reply: String) -> Result<CareerDoc, AnalysisError> {
    match kind {
        CareerDocKind::CoverLetter => Ok(CareerDoc::CoverLetter { text: reply }),
        CareerDocKind::InterviewPrep => {
            let parsed: InterviewPrepReply = parse_json_reply(&reply).map_err(|e| {
                AnalysisError::InvalidReply(format!("interview prep is not valid JSON: {e}"))
            })?;
            Ok(CareerDoc::InterviewPrep {
                questions: parsed.questions,
            })
        }
    }
}

pub async fn generate_career_doc(
    analyzer: &dyn ResumeAnalyzer,
    kind: CareerDocKind,
    job_description: &str,
    context: &str,
) -> Result<CareerDoc, AnalysisError> {
    let prompt = build_career_prompt(kind, job_description, context);
    let reply = analyzer.generate(&prompt).await?;
    let doc = parse_career_reply(kind, reply)?;
    info!(?kind, "Career document generated");
    Ok(doc)
}

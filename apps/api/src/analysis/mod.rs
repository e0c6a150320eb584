// Resume analysis: ATS scoring of extracted text and job-specific career
// documents. All model calls go through llm_client.

pub mod analyzer;
pub mod career_docs;
pub mod models;
pub mod prompts;

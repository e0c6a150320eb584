// LLM prompt templates for resume analysis and career documents.

/// System prompt for ATS scoring: enforces JSON-only output.
pub const ANALYZE_SYSTEM: &str = "You are an expert ATS and resume coach. \
    Score resumes the way applicant tracking systems and recruiters read them. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// ATS scoring prompt. Replace `{resume_text}` before sending.
pub const ANALYZE_PROMPT_TEMPLATE: &str = r#"Analyze the following resume text.

RESUME TEXT:
"{resume_text}"

Return a JSON object with this EXACT schema:
{
  "ats_score": number,
  "summary_feedback": "string",
  "skills_found": ["skill1", "skill2"],
  "missing_keywords": ["keyword1", "keyword2"],
  "formatting_issues": ["issue1", "issue2"]
}

ats_score is 0-100."#;

/// Cover letter prompt. Replace `{job_description}` and `{context}`.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a professional cover letter for the following job description:
"{job_description}"

Using the candidate's background details here:
{context}

Keep it concise, professional, and highlight matching skills.
Output ONLY the cover letter text."#;

/// Interview prep prompt. Replace `{job_description}` and `{context}`.
pub const INTERVIEW_PREP_PROMPT_TEMPLATE: &str = r#"You are an expert technical recruiter. Based on this job description:
"{job_description}"

And this candidate's resume:
{context}

Generate 5 likely interview questions and brief suggested answers.
Return the output in this exact JSON format (do not use markdown code blocks):
{
  "questions": [
    { "question": "...", "answer": "..." }
  ]
}"#;

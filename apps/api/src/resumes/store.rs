//! Resume persistence: the only module that writes `resumes` and `analyses`.
//!
//! `AppState` carries an `Arc<dyn ResumeStore>`; `PgResumeStore` is the Postgres
//! implementation. Records are insert-only.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::analysis::models::AnalysisResult;
use crate::models::resume::{AnalysisRow, ResumeDetail, ResumeRow, ResumeSummary};

/// Input for one completed upload.
pub struct NewResume<'a> {
    pub user_id: Uuid,
    pub file_name: &'a str,
    /// Normalized text, already capped by the assembler.
    pub content: &'a str,
    pub analysis: &'a AnalysisResult,
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Stores the resume and its analysis together; returns the new resume id.
    async fn insert(&self, record: NewResume<'_>) -> Result<Uuid>;

    /// The user's resumes, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ResumeSummary>>;

    /// One resume, only if it belongs to `user_id`.
    async fn get_for_user(&self, user_id: Uuid, resume_id: Uuid) -> Result<Option<ResumeDetail>>;
}

pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn insert(&self, record: NewResume<'_>) -> Result<Uuid> {
        let NewResume {
            user_id,
            file_name,
            content,
            analysis,
        } = record;
        let resume_id = Uuid::new_v4();

        // Both rows or neither.
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO resumes (id, user_id, file_name, content) VALUES ($1, $2, $3, $4)",
        )
        .bind(resume_id)
        .bind(user_id)
        .bind(file_name)
        .bind(content)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO analyses
                (id, resume_id, user_id, ats_score, summary_feedback,
                 skills_found, missing_keywords, formatting_issues)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(resume_id)
        .bind(user_id)
        .bind(analysis.ats_score)
        .bind(&analysis.summary_feedback)
        .bind(&analysis.skills_found)
        .bind(&analysis.missing_keywords)
        .bind(&analysis.formatting_issues)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Stored resume {resume_id} for user {user_id}");
        Ok(resume_id)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ResumeSummary>> {
        let rows = sqlx::query_as::<_, ResumeSummary>(
            r#"
            SELECT r.id, r.file_name, r.created_at, a.ats_score
            FROM resumes r
            LEFT JOIN analyses a ON a.resume_id = r.id
            WHERE r.user_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_for_user(&self, user_id: Uuid, resume_id: Uuid) -> Result<Option<ResumeDetail>> {
        let resume: Option<ResumeRow> =
            sqlx::query_as("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
                .bind(resume_id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        let Some(resume) = resume else {
            return Ok(None);
        };

        let analysis: Option<AnalysisRow> =
            sqlx::query_as("SELECT * FROM analyses WHERE resume_id = $1")
                .bind(resume_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(Some(ResumeDetail {
            resume,
            analysis: analysis.map(AnalysisResult::from),
        }))
    }
}

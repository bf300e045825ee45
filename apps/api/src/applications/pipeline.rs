//! The application ranking pipeline.
//!
//! One submission walks Validate → Extract → Score → Persist → Notify.
//! Extraction is a hard precondition (an unreadable upload rejects the
//! request); scoring never hard-fails (the scorer degrades internally);
//! notification runs off the response path. The pre-check endpoint reuses
//! `score_resume`, so the number it shows is the number submission stores.

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::AuthedUser;
use crate::errors::AppError;
use crate::extract::{extract_resume_text, ExtractedText};
use crate::models::application::ApplicationRow;
use crate::models::job::JobRow;
use crate::notify::{self, templates};
use crate::scoring::{AtsScorer, ScoreResult, ScorerBackend};
use crate::state::AppState;

/// Upload size ceiling.
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

const PG_UNIQUE_VIOLATION: &str = "23505";

/// Submission form fields, validated once at the boundary.
#[derive(Debug)]
pub struct SubmissionForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub cover_letter: String,
    pub job_id: Uuid,
}

/// The uploaded resume document as received from the multipart field.
#[derive(Debug)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Mimetype and size preconditions. Signature validation happens in the
/// extractor, which sees the actual bytes.
pub fn validate_resume_upload(upload: &ResumeUpload) -> Result<(), AppError> {
    if upload.content_type != "application/pdf" {
        return Err(AppError::Validation(
            "Only PDF files are allowed!".to_string(),
        ));
    }
    if upload.bytes.len() > MAX_RESUME_BYTES {
        return Err(AppError::Validation(
            "File size should be less than 5MB!".to_string(),
        ));
    }
    Ok(())
}

/// Steps shared verbatim between submission and the pre-application check:
/// upload validation, extraction, scoring. Returns a bounded score or the
/// validation/extraction rejection, never a scoring failure.
pub async fn score_resume(
    scorer: &dyn AtsScorer,
    upload: &ResumeUpload,
    required_skills: &[String],
) -> Result<ScoreResult, AppError> {
    validate_resume_upload(upload)?;

    match extract_resume_text(&upload.bytes)? {
        ExtractedText::NoReadableText => {
            warn!("resume contains no readable text, applying minimum score");
            Ok(ScoreResult::no_readable_text(required_skills))
        }
        ExtractedText::Text(text) => Ok(scorer.score(&text, required_skills).await),
    }
}

/// Full submission: returns the persisted application row.
pub async fn submit_application(
    state: &AppState,
    user: &AuthedUser,
    form: SubmissionForm,
    upload: ResumeUpload,
) -> Result<ApplicationRow, AppError> {
    info!(job_id = %form.job_id, file = %upload.file_name, "processing application submission");

    let job: JobRow = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(form.job_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found!".to_string()))?;

    // Early duplicate check for a clear answer before any scoring work; the
    // unique index on (applicant_id, job_id) is the real arbiter under
    // concurrent submissions.
    let already_applied: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM applications WHERE applicant_id = $1 AND job_id = $2)",
    )
    .bind(user.id)
    .bind(form.job_id)
    .fetch_one(&state.db)
    .await?;
    if already_applied {
        return Err(AppError::DuplicateApplication);
    }

    let score = score_resume(state.ats_scorer.as_ref(), &upload, &job.skills).await?;
    if score.backend == ScorerBackend::Heuristic {
        warn!(job_id = %job.id, "application scored by heuristic fallback");
    }

    let stored_name = stored_resume_name(&user.name);
    let resume_url = state
        .resume_store
        .upload(&stored_name, &upload.bytes, &upload.content_type)
        .await?;

    let application: ApplicationRow = sqlx::query_as(
        r#"
        INSERT INTO applications
            (id, applicant_id, employer_id, job_id, name, email, phone, address,
             cover_letter, resume_url, resume_stored_name, ats_score, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 'Pending')
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(job.posted_by)
    .bind(job.id)
    .bind(&form.name)
    .bind(&form.email)
    .bind(&form.phone)
    .bind(&form.address)
    .bind(&form.cover_letter)
    .bind(&resume_url)
    .bind(&stored_name)
    .bind(i32::from(score.score))
    .fetch_one(&state.db)
    .await
    .map_err(map_insert_error)?;

    notify::spawn_send(
        state.mailer.clone(),
        application.email.clone(),
        format!("Confirmation of Your Application for {}", job.title),
        templates::application_received_html(&application.name, &job.title, &job.company_name),
    );

    Ok(application)
}

/// A storable, URL-safe object name derived from the applicant's name.
fn stored_resume_name(applicant_name: &str) -> String {
    let safe: String = applicant_name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_{}.pdf", safe, Uuid::new_v4())
}

fn is_unique_violation_code(code: Option<&str>) -> bool {
    code == Some(PG_UNIQUE_VIOLATION)
}

/// A lost race on the unique (applicant_id, job_id) index is a duplicate
/// submission, not a server fault.
fn map_insert_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db) = e {
        if is_unique_violation_code(db.code().as_deref()) {
            return AppError::DuplicateApplication;
        }
    }
    AppError::Database(e)
}

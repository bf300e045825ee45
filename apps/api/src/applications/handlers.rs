//! Axum route handlers for the Applications API.

use std::collections::HashMap;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::applications::pipeline::{
    score_resume, submit_application, ResumeUpload, SubmissionForm,
};
use crate::auth::{AuthedUser, Role};
use crate::errors::AppError;
use crate::models::application::{ApplicationRow, ApplicationWithJobRow};
use crate::models::job::JobRow;
use crate::state::AppState;

const EMPLOYER_BLOCKED: &str = "Employer not allowed to access this resource.";
const SEEKER_BLOCKED: &str = "Job Seekers cannot access this resource.";

/// POST /api/v1/applications
///
/// Multipart submission: form fields plus the `resume` file field. Runs the
/// full ranking pipeline and returns the persisted application.
pub async fn handle_submit(
    State(state): State<AppState>,
    user: AuthedUser,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    user.require_role(Role::JobSeeker, EMPLOYER_BLOCKED)?;

    let (fields, resume) = read_multipart(multipart).await?;
    let resume = resume.ok_or_else(|| AppError::Validation("Resume file required!".to_string()))?;
    let form = submission_form_from_fields(&fields)?;

    let application = submit_application(&state, &user, form, resume).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Application Submitted!",
        "application": application,
    })))
}

/// POST /api/v1/applications/check-ats
///
/// Pre-application self-check: multipart {job_id, resume}. Validation and
/// scoring are the same code path as submission; nothing is persisted.
pub async fn handle_check_ats(
    State(state): State<AppState>,
    user: AuthedUser,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    user.require_role(Role::JobSeeker, EMPLOYER_BLOCKED)?;

    let (fields, resume) = read_multipart(multipart).await?;
    let resume = resume.ok_or_else(|| AppError::Validation("Resume file required!".to_string()))?;
    let job_id = parse_job_id(&fields)?;

    let job: JobRow = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found!".to_string()))?;

    let result = score_resume(state.ats_scorer.as_ref(), &resume, &job.skills).await?;

    Ok(Json(json!({
        "success": true,
        "ats_score": result.score,
    })))
}

/// GET /api/v1/applications/mine
pub async fn handle_my_applications(
    State(state): State<AppState>,
    user: AuthedUser,
) -> Result<Json<Value>, AppError> {
    user.require_role(Role::JobSeeker, "Employers cannot view applications this way.")?;

    let applications: Vec<ApplicationWithJobRow> = sqlx::query_as(
        r#"
        SELECT a.*, j.title AS job_title, j.company_name
        FROM applications a
        JOIN jobs j ON j.id = a.job_id
        WHERE a.applicant_id = $1
        ORDER BY a.applied_at DESC
        "#,
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(json!({
        "success": true,
        "applications": applications,
    })))
}

/// GET /api/v1/applications/job/:job_id
///
/// All applications for one of the caller's own postings.
pub async fn handle_job_applications(
    State(state): State<AppState>,
    user: AuthedUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    user.require_role(Role::Employer, SEEKER_BLOCKED)?;

    let job: JobRow = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found!".to_string()))?;

    if job.posted_by != user.id {
        return Err(AppError::Forbidden(
            "You are not authorized to view applications for this job.".to_string(),
        ));
    }

    let applications: Vec<ApplicationRow> =
        sqlx::query_as("SELECT * FROM applications WHERE job_id = $1 ORDER BY applied_at DESC")
            .bind(job_id)
            .fetch_all(&state.db)
            .await?;

    Ok(Json(json!({
        "success": true,
        "applications": applications,
    })))
}

/// GET /api/v1/applications/:id
pub async fn handle_get_application(
    State(state): State<AppState>,
    user: AuthedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let application: ApplicationRow =
        sqlx::query_as("SELECT * FROM applications WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Application not found!".to_string()))?;

    if application.applicant_id != user.id && application.employer_id != user.id {
        return Err(AppError::Forbidden(
            "You are not authorized to view this application.".to_string(),
        ));
    }

    Ok(Json(json!({
        "success": true,
        "application": application,
    })))
}

/// DELETE /api/v1/applications/:id
pub async fn handle_delete_application(
    State(state): State<AppState>,
    user: AuthedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let application: ApplicationRow =
        sqlx::query_as("SELECT * FROM applications WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Application not found!".to_string()))?;

    let owns = match user.role {
        Role::JobSeeker => application.applicant_id == user.id,
        Role::Employer => application.employer_id == user.id,
    };
    if !owns {
        return Err(AppError::Forbidden(
            "You are not authorized to delete this application.".to_string(),
        ));
    }

    sqlx::query("DELETE FROM applications WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Application Deleted Successfully!",
    })))
}

/// Drains a multipart stream into text fields plus the optional resume file.
async fn read_multipart(
    mut multipart: Multipart,
) -> Result<(HashMap<String, String>, Option<ResumeUpload>), AppError> {
    let mut fields = HashMap::new();
    let mut resume = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart payload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "resume" {
            let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Could not read resume upload: {e}")))?;
            resume = Some(ResumeUpload {
                file_name,
                content_type,
                bytes,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("Could not read field '{name}': {e}")))?;
            fields.insert(name, value);
        }
    }

    Ok((fields, resume))
}

fn submission_form_from_fields(fields: &HashMap<String, String>) -> Result<SubmissionForm, AppError> {
    let required = |key: &str| -> Result<String, AppError> {
        fields
            .get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Validation("Please fill all fields.".to_string()))
    };

    Ok(SubmissionForm {
        name: required("name")?,
        email: required("email")?,
        phone: required("phone")?,
        address: required("address")?,
        cover_letter: required("cover_letter")?,
        job_id: parse_job_id(fields)?,
    })
}

fn parse_job_id(fields: &HashMap<String, String>) -> Result<Uuid, AppError> {
    let raw = fields
        .get("job_id")
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation("Job ID is required.".to_string()))?;
    Uuid::parse_str(raw).map_err(|_| AppError::Validation("Invalid job id.".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_fields() -> HashMap<String, String> {
        let mut fields = HashMap::new();
        for (k, v) in [
            ("name", "Asha Rao"),
            ("email", "asha@example.com"),
            ("phone", "+91 99999 00000"),
            ("address", "12 MG Road, Bengaluru"),
            ("cover_letter", "I am a strong fit for this role."),
        ] {
            fields.insert(k.to_string(), v.to_string());
        }
        fields.insert("job_id".to_string(), Uuid::new_v4().to_string());
        fields
    }

    #[test]
    fn test_form_parses_when_complete() {
        let form = submission_form_from_fields(&full_fields()).unwrap();
        assert_eq!(form.name, "Asha Rao");
        assert_eq!(form.email, "asha@example.com");
    }

    #[test]
    fn test_missing_field_rejected() {
        for key in ["name", "email", "phone", "address", "cover_letter"] {
            let mut fields = full_fields();
            fields.remove(key);
            let err = submission_form_from_fields(&fields).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "missing {key}");
        }
    }

    #[test]
    fn test_blank_field_rejected() {
        let mut fields = full_fields();
        fields.insert("name".to_string(), "   ".to_string());
        assert!(submission_form_from_fields(&fields).is_err());
    }

    #[test]
    fn test_missing_job_id_rejected() {
        let mut fields = full_fields();
        fields.remove("job_id");
        let err = submission_form_from_fields(&fields).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_malformed_job_id_rejected() {
        let mut fields = full_fields();
        fields.insert("job_id".to_string(), "42".to_string());
        let err = parse_job_id(&fields).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}

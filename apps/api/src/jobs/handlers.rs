//! Axum route handlers for the Jobs API: postings CRUD, the shortlist
//! toggle, and the employer score chart.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::{AuthedUser, Role};
use crate::errors::AppError;
use crate::models::job::{JobRow, ScoreChartPoint, JOB_TYPES};
use crate::notify::{self, templates};
use crate::state::AppState;

const SEEKER_BLOCKED: &str = "Job Seeker not allowed to access this resource.";

#[derive(Debug, Deserialize)]
pub struct JobPayload {
    pub title: String,
    pub company_name: String,
    pub description: String,
    pub category: String,
    pub country: String,
    pub city: String,
    pub location: String,
    pub skills: Vec<String>,
    pub fixed_salary: Option<i64>,
    pub salary_from: Option<i64>,
    pub salary_to: Option<i64>,
    pub job_type: String,
}

/// Required fields, the non-empty skill set, a known job type, and the
/// fixed-XOR-ranged salary rule.
fn validate_job_payload(payload: &JobPayload) -> Result<(), AppError> {
    let required = [
        &payload.title,
        &payload.company_name,
        &payload.description,
        &payload.category,
        &payload.country,
        &payload.city,
        &payload.location,
    ];
    if required.iter().any(|f| f.trim().is_empty()) {
        return Err(AppError::Validation(
            "Please provide full job details.".to_string(),
        ));
    }

    if payload.skills.iter().all(|s| s.trim().is_empty()) {
        return Err(AppError::Validation(
            "At least one skill is required!".to_string(),
        ));
    }

    if !JOB_TYPES.contains(&payload.job_type.as_str()) {
        return Err(AppError::Validation(
            "Please select job type (Full Time or Part Time).".to_string(),
        ));
    }

    let has_from = payload.salary_from.is_some();
    let has_to = payload.salary_to.is_some();
    if payload.fixed_salary.is_some() {
        if has_from || has_to {
            return Err(AppError::Validation(
                "Cannot enter fixed and ranged salary together.".to_string(),
            ));
        }
    } else if !(has_from && has_to) {
        return Err(AppError::Validation(
            "Please either provide fixed salary or ranged salary.".to_string(),
        ));
    }
    Ok(())
}

/// GET /api/v1/jobs
///
/// All non-expired postings. Public.
pub async fn handle_get_all_jobs(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let jobs: Vec<JobRow> =
        sqlx::query_as("SELECT * FROM jobs WHERE expired = FALSE ORDER BY posted_at DESC")
            .fetch_all(&state.db)
            .await?;

    Ok(Json(json!({ "success": true, "jobs": jobs })))
}

/// GET /api/v1/jobs/:id
///
/// Single posting. Public.
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let job = fetch_job(&state, id).await?;
    Ok(Json(json!({ "success": true, "job": job })))
}

/// POST /api/v1/jobs
///
/// Employer-only.
pub async fn handle_post_job(
    State(state): State<AppState>,
    user: AuthedUser,
    Json(payload): Json<JobPayload>,
) -> Result<Json<Value>, AppError> {
    user.require_role(Role::Employer, SEEKER_BLOCKED)?;
    validate_job_payload(&payload)?;

    let job: JobRow = sqlx::query_as(
        r#"
        INSERT INTO jobs
            (id, title, company_name, description, category, country, city, location,
             skills, fixed_salary, salary_from, salary_to, job_type, posted_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&payload.title)
    .bind(&payload.company_name)
    .bind(&payload.description)
    .bind(&payload.category)
    .bind(&payload.country)
    .bind(&payload.city)
    .bind(&payload.location)
    .bind(&payload.skills)
    .bind(payload.fixed_salary)
    .bind(payload.salary_from)
    .bind(payload.salary_to)
    .bind(&payload.job_type)
    .bind(user.id)
    .fetch_one(&state.db)
    .await?;

    notify::spawn_send(
        state.mailer.clone(),
        user.email.clone(),
        format!("Your Job Posting \"{}\" is Live!", job.title),
        templates::job_posted_html(&user.name, &job.title, &job.company_name),
    );

    Ok(Json(json!({
        "success": true,
        "message": "Job Posted Successfully!",
        "job": job,
    })))
}

/// GET /api/v1/jobs/mine
///
/// The caller's own postings.
pub async fn handle_my_jobs(
    State(state): State<AppState>,
    user: AuthedUser,
) -> Result<Json<Value>, AppError> {
    user.require_role(Role::Employer, SEEKER_BLOCKED)?;

    let jobs: Vec<JobRow> =
        sqlx::query_as("SELECT * FROM jobs WHERE posted_by = $1 ORDER BY posted_at DESC")
            .bind(user.id)
            .fetch_all(&state.db)
            .await?;

    Ok(Json(json!({ "success": true, "jobs": jobs })))
}

/// PUT /api/v1/jobs/:id
///
/// Full update of an owned posting.
pub async fn handle_update_job(
    State(state): State<AppState>,
    user: AuthedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<JobPayload>,
) -> Result<Json<Value>, AppError> {
    user.require_role(Role::Employer, SEEKER_BLOCKED)?;

    let job = fetch_job(&state, id).await?;
    if job.posted_by != user.id {
        return Err(AppError::Forbidden(
            "You are not authorized to update this job.".to_string(),
        ));
    }

    validate_job_payload(&payload)?;

    sqlx::query(
        r#"
        UPDATE jobs SET
            title = $1, company_name = $2, description = $3, category = $4,
            country = $5, city = $6, location = $7, skills = $8,
            fixed_salary = $9, salary_from = $10, salary_to = $11, job_type = $12
        WHERE id = $13
        "#,
    )
    .bind(&payload.title)
    .bind(&payload.company_name)
    .bind(&payload.description)
    .bind(&payload.category)
    .bind(&payload.country)
    .bind(&payload.city)
    .bind(&payload.location)
    .bind(&payload.skills)
    .bind(payload.fixed_salary)
    .bind(payload.salary_from)
    .bind(payload.salary_to)
    .bind(&payload.job_type)
    .bind(id)
    .execute(&state.db)
    .await?;

    Ok(Json(json!({ "success": true, "message": "Job Updated!" })))
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    user: AuthedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    user.require_role(Role::Employer, SEEKER_BLOCKED)?;

    let job = fetch_job(&state, id).await?;
    if job.posted_by != user.id {
        return Err(AppError::Forbidden(
            "You are not authorized to delete this job.".to_string(),
        ));
    }

    sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({ "success": true, "message": "Job Deleted!" })))
}

#[derive(Debug, Deserialize)]
pub struct ShortlistRequest {
    pub job_id: Uuid,
    pub application_id: Uuid,
    pub applicant_id: Uuid,
}

/// POST /api/v1/jobs/shortlist
///
/// Toggles an applicant on the shortlist.
pub async fn handle_shortlist(
    State(state): State<AppState>,
    user: AuthedUser,
    Json(req): Json<ShortlistRequest>,
) -> Result<Json<Value>, AppError> {
    user.require_role(Role::Employer, SEEKER_BLOCKED)?;

    let job = fetch_job(&state, req.job_id).await?;
    if job.posted_by != user.id {
        return Err(AppError::Forbidden(
            "You are not authorized to shortlist for this job.".to_string(),
        ));
    }

    let existing: Option<(Uuid,)> = sqlx::query_as(
        "SELECT job_id FROM job_shortlist WHERE job_id = $1 AND application_id = $2",
    )
    .bind(req.job_id)
    .bind(req.application_id)
    .fetch_optional(&state.db)
    .await?;

    if existing.is_some() {
        sqlx::query("DELETE FROM job_shortlist WHERE job_id = $1 AND application_id = $2")
            .bind(req.job_id)
            .bind(req.application_id)
            .execute(&state.db)
            .await?;

        return Ok(Json(json!({
            "success": true,
            "message": "Applicant removed from shortlist.",
        })));
    }

    sqlx::query(
        "INSERT INTO job_shortlist (job_id, applicant_id, application_id) VALUES ($1, $2, $3)",
    )
    .bind(req.job_id)
    .bind(req.applicant_id)
    .bind(req.application_id)
    .execute(&state.db)
    .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Applicant Shortlisted!",
    })))
}

/// GET /api/v1/jobs/:id/score-chart
///
/// Ordered (applicant_name, ats_score) pairs for the employer chart. The
/// scores are exactly what submission persisted; nothing is re-scored here.
pub async fn handle_score_chart(
    State(state): State<AppState>,
    user: AuthedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    user.require_role(Role::Employer, SEEKER_BLOCKED)?;

    let job = fetch_job(&state, id).await?;
    if job.posted_by != user.id {
        return Err(AppError::Forbidden(
            "You are not authorized to view applications for this job.".to_string(),
        ));
    }

    let points: Vec<ScoreChartPoint> = sqlx::query_as(
        r#"
        SELECT name AS applicant_name, ats_score
        FROM applications
        WHERE job_id = $1
        ORDER BY ats_score DESC, applied_at ASC
        "#,
    )
    .bind(id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(json!({ "success": true, "points": points })))
}

async fn fetch_job(state: &AppState, id: Uuid) -> Result<JobRow, AppError> {
    sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found.".to_string()))
}

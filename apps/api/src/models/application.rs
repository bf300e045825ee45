use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One persisted application. `ats_score` is write-once: it is set at
/// submission and never recomputed. Status moves through
/// Pending/Reviewed/Accepted/Rejected, constrained by the schema.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub employer_id: Uuid,
    pub job_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub cover_letter: String,
    pub resume_url: String,
    pub resume_stored_name: String,
    pub ats_score: i32,
    pub status: String,
    pub applied_at: DateTime<Utc>,
}

/// Application joined with its job's title and company, for list views.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicationWithJobRow {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub employer_id: Uuid,
    pub job_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub cover_letter: String,
    pub resume_url: String,
    pub resume_stored_name: String,
    pub ats_score: i32,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub job_title: String,
    pub company_name: String,
}

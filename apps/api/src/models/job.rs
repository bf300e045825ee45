use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Allowed job type labels, as stored and as exposed over the API.
pub const JOB_TYPES: &[&str] = &["Full Time", "Part Time"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
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
    /// Soft retirement flag. Jobs are never physically deleted by expiry.
    pub expired: bool,
    pub posted_by: Uuid,
    pub posted_at: DateTime<Utc>,
}

/// One bar of the employer's score chart: persisted scores only, ordered
/// score-descending by the query that produces them.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ScoreChartPoint {
    pub applicant_name: String,
    pub ats_score: i32,
}

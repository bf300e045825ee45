pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::applications::handlers as applications;
use crate::jobs::handlers as jobs;
use crate::state::AppState;

/// Multipart bodies carry up to a 5 MiB resume plus the form fields; the
/// default axum body limit is smaller than that.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs API
        .route(
            "/api/v1/jobs",
            get(jobs::handle_get_all_jobs).post(jobs::handle_post_job),
        )
        .route("/api/v1/jobs/mine", get(jobs::handle_my_jobs))
        .route("/api/v1/jobs/shortlist", post(jobs::handle_shortlist))
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handle_get_job)
                .put(jobs::handle_update_job)
                .delete(jobs::handle_delete_job),
        )
        .route("/api/v1/jobs/:id/score-chart", get(jobs::handle_score_chart))
        // Applications API
        .route("/api/v1/applications", post(applications::handle_submit))
        .route(
            "/api/v1/applications/check-ats",
            post(applications::handle_check_ats),
        )
        .route(
            "/api/v1/applications/mine",
            get(applications::handle_my_applications),
        )
        .route(
            "/api/v1/applications/job/:job_id",
            get(applications::handle_job_applications),
        )
        .route(
            "/api/v1/applications/:id",
            get(applications::handle_get_application)
                .delete(applications::handle_delete_application),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

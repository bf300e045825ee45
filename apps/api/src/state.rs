use std::sync::Arc;

use sqlx::PgPool;

use crate::notify::Mailer;
use crate::scoring::AtsScorer;
use crate::storage::ResumeStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. The collaborators sit behind trait objects so tests and
/// alternative deployments can swap them at startup.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable ATS scorer. Default: `LlmScorer` degrading to the heuristic;
    /// heuristic-only when no model key is configured.
    pub ats_scorer: Arc<dyn AtsScorer>,
    /// Resume storage: object store with local-filesystem fallback.
    pub resume_store: Arc<dyn ResumeStore>,
    pub mailer: Arc<dyn Mailer>,
}

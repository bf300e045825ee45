mod applications;
mod auth;
mod config;
mod db;
mod errors;
mod extract;
mod jobs;
mod llm_client;
mod models;
mod notify;
mod routes;
mod scoring;
mod state;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::notify::{HttpMailer, LogMailer, Mailer};
use crate::routes::build_router;
use crate::scoring::{AtsScorer, HeuristicScorer, LlmScorer};
use crate::state::AppState;
use crate::storage::{FallbackResumeStore, LocalResumeStore, ResumeStore, S3ResumeStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (aborts on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{}={}", target, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobConnect API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize S3 / MinIO with local-filesystem fallback
    let s3 = build_s3_client(&config).await;
    let resume_store: Arc<dyn ResumeStore> = Arc::new(FallbackResumeStore::new(
        Arc::new(S3ResumeStore::new(
            s3,
            config.s3_bucket.clone(),
            config.s3_endpoint.clone(),
        )),
        Arc::new(LocalResumeStore::new(
            config.upload_dir.clone(),
            config.public_base_url.clone(),
        )),
    ));
    info!("Resume store initialized (bucket: {})", config.s3_bucket);

    // Initialize the ATS scorer: LLM path with heuristic degradation, or the
    // heuristic alone when no model key is configured
    let ats_scorer: Arc<dyn AtsScorer> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(
                key.clone(),
                Duration::from_secs(config.llm_timeout_secs),
            );
            info!("ATS scorer initialized (model: {})", llm_client::MODEL);
            Arc::new(LlmScorer::new(Arc::new(llm)))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; ATS scoring runs heuristic-only");
            Arc::new(HeuristicScorer)
        }
    };

    // Initialize the mailer
    let mailer: Arc<dyn Mailer> = match &config.mail_relay_url {
        Some(url) => Arc::new(HttpMailer::new(url.clone(), config.mail_from.clone())),
        None => Arc::new(LogMailer),
    };

    // Build app state
    let state = AppState {
        db,
        ats_scorer,
        resume_store,
        mailer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "jobconnect-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}

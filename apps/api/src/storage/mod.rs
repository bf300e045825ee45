//! Resume document storage.
//!
//! One capability, `ResumeStore::upload`, with three implementations: the S3
//! store, the local filesystem store, and `FallbackResumeStore`, which tries
//! a primary and recovers through a fallback. The orchestrator only ever
//! sees the single trait, never a branch between backends.

pub mod local;
pub mod s3;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

pub use local::LocalResumeStore;
pub use s3::S3ResumeStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object store upload failed: {0}")]
    ObjectStore(String),

    #[error("filesystem write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Stores a resume document and returns its public URL.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn upload(
        &self,
        stored_name: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError>;
}

/// Primary/fallback composition: try the primary store, recover through the
/// fallback, surface an error only when both fail.
pub struct FallbackResumeStore {
    primary: Arc<dyn ResumeStore>,
    fallback: Arc<dyn ResumeStore>,
}

impl FallbackResumeStore {
    pub fn new(primary: Arc<dyn ResumeStore>, fallback: Arc<dyn ResumeStore>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl ResumeStore for FallbackResumeStore {
    async fn upload(
        &self,
        stored_name: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        match self.primary.upload(stored_name, bytes, content_type).await {
            Ok(url) => Ok(url),
            Err(e) => {
                warn!("primary resume store failed ({e}), falling back");
                self.fallback.upload(stored_name, bytes, content_type).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct OkStore {
        url: &'static str,
        calls: AtomicUsize,
    }

    impl OkStore {
        fn new(url: &'static str) -> Self {
            Self {
                url,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ResumeStore for OkStore {
        async fn upload(&self, _: &str, _: &[u8], _: &str) -> Result<String, StorageError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.url.to_string())
        }
    }

    struct FailStore {
        calls: AtomicUsize,
    }

    impl FailStore {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ResumeStore for FailStore {
        async fn upload(&self, _: &str, _: &[u8], _: &str) -> Result<String, StorageError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StorageError::ObjectStore("bucket unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_primary_success_skips_fallback() {
        let primary = Arc::new(OkStore::new("https://cdn/x.pdf"));
        let fallback = Arc::new(OkStore::new("http://local/x.pdf"));
        let store = FallbackResumeStore::new(primary.clone(), fallback.clone());

        let url = store.upload("x.pdf", b"%PDF", "application/pdf").await.unwrap();
        assert_eq!(url, "https://cdn/x.pdf");
        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_primary_failure_recovers_through_fallback() {
        let primary = Arc::new(FailStore::new());
        let fallback = Arc::new(OkStore::new("http://local/x.pdf"));
        let store = FallbackResumeStore::new(primary.clone(), fallback.clone());

        let url = store.upload("x.pdf", b"%PDF", "application/pdf").await.unwrap();
        assert_eq!(url, "http://local/x.pdf");
        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_both_failing_surfaces_error() {
        let store = FallbackResumeStore::new(
            Arc::new(FailStore::new()),
            Arc::new(FailStore::new()),
        );
        let err = store.upload("x.pdf", b"%PDF", "application/pdf").await;
        assert!(err.is_err());
    }
}

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::storage::{ResumeStore, StorageError};

/// Filesystem-backed resume store. Used as the fallback when the object
/// store is unreachable; files are served under `/uploads/resumes/` by
/// whatever fronts this service.
pub struct LocalResumeStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalResumeStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: String) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ResumeStore for LocalResumeStore {
    async fn upload(
        &self,
        stored_name: &str,
        bytes: &[u8],
        _content_type: &str,
    ) -> Result<String, StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;

        let path = self.root.join(stored_name);
        tokio::fs::write(&path, bytes).await?;

        info!(path = %path.display(), "resume stored on local filesystem");
        Ok(format!(
            "{}/uploads/resumes/{stored_name}",
            self.public_base_url
        ))
    }
}

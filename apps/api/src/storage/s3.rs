use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use tracing::info;

use crate::storage::{ResumeStore, StorageError};

/// S3 / MinIO-backed resume store. Objects land under `resumes/` in the
/// configured bucket; the returned URL follows the path-style public-read
/// convention the bucket is provisioned with.
pub struct S3ResumeStore {
    client: S3Client,
    bucket: String,
    endpoint: String,
}

impl S3ResumeStore {
    pub fn new(client: S3Client, bucket: String, endpoint: String) -> Self {
        Self {
            client,
            bucket,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    fn object_key(stored_name: &str) -> String {
        format!("resumes/{stored_name}")
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, key)
    }
}

#[async_trait]
impl ResumeStore for S3ResumeStore {
    async fn upload(
        &self,
        stored_name: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        let key = Self::object_key(stored_name);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(bytes.to_vec()))
            .send()
            .await
            .map_err(|e| StorageError::ObjectStore(e.to_string()))?;

        let url = self.public_url(&key);
        info!(%key, "resume uploaded to object store");
        Ok(url)
    }
}

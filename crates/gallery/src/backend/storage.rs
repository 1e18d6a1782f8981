//! Object storage operations: buckets, uploads, public URLs.

use serde_json::json;
use thiserror::Error;
use tracing::instrument;

use super::client::BackendClient;
use super::types::{ApiErrorBody, Bucket};

/// Errors that can occur when interacting with object storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The storage API returned an error response.
    #[error("storage API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Turn a non-success storage response into a [`StorageError::Api`].
async fn check(response: reqwest::Response) -> Result<reqwest::Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let parsed: ApiErrorBody = serde_json::from_str(&body).unwrap_or_default();
    Err(StorageError::Api {
        status: status.as_u16(),
        message: parsed
            .message()
            .unwrap_or_else(|| body.chars().take(200).collect()),
    })
}

impl BackendClient {
    /// List all storage buckets.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_buckets(&self) -> Result<Vec<Bucket>, StorageError> {
        let url = self.endpoint("/storage/v1/bucket");
        let response = self.authed(self.inner.http.get(&url)).send().await?;
        let response = check(response).await?;
        Ok(response.json().await?)
    }

    /// Create a bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (including when the bucket
    /// already exists - callers list first).
    #[instrument(skip(self), fields(bucket = %name))]
    pub async fn create_bucket(
        &self,
        name: &str,
        public: bool,
        file_size_limit: u64,
    ) -> Result<(), StorageError> {
        let url = self.endpoint("/storage/v1/bucket");
        let response = self
            .authed(self.inner.http.post(&url))
            .json(&json!({
                "id": name,
                "name": name,
                "public": public,
                "file_size_limit": file_size_limit,
            }))
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    /// Upload an object.
    ///
    /// The object is stored under `bucket/path`; an existing object at the
    /// same path is an error (paths are randomized by callers, so
    /// collisions are not expected).
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails.
    #[instrument(skip(self, bytes), fields(bucket = %bucket, path = %path, size = bytes.len()))]
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), StorageError> {
        let url = self.endpoint(&format!("/storage/v1/object/{bucket}/{path}"));
        let response = self
            .authed(self.inner.http.post(&url))
            .header("Content-Type", content_type.to_string())
            .body(bytes)
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    /// Public URL for an object in a public bucket.
    ///
    /// Purely local string construction - no network call, no existence
    /// check.
    #[must_use]
    pub fn get_public_url(&self, bucket: &str, path: &str) -> String {
        self.endpoint(&format!("/storage/v1/object/public/{bucket}/{path}"))
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::config::BackendConfig;

    #[test]
    fn test_get_public_url() {
        let client = BackendClient::new(&BackendConfig {
            url: "https://project.supabase.co".to_string(),
            anon_key: SecretString::from("anon-key"),
        });

        assert_eq!(
            client.get_public_url("avatars", "user-1/pic.png"),
            "https://project.supabase.co/storage/v1/object/public/avatars/user-1/pic.png"
        );
    }
}

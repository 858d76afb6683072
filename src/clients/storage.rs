//! Binary uploads to the hosted object store.
//!
//! Objects go to `{base_url}/object/{bucket}/{path}` with the service key as
//! bearer token and are served back from `{base_url}/object/public/...`.

use crate::{clients::check_status, common::error::AppError};

#[derive(Clone)]
pub struct StorageClient {
    client: reqwest::Client,
    base_url: String,
    bucket: String,
    service_key: String,
}

impl StorageClient {
    pub fn new(client: reqwest::Client, base_url: &str, bucket: &str, service_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            service_key: service_key.to_string(),
        }
    }

    pub fn public_url(&self, path: &str) -> String {
        format!("{}/object/public/{}/{}", self.base_url, self.bucket, path)
    }

    /// Uploads (or overwrites) `path` and returns its public URL.
    pub async fn upload(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AppError> {
        let url = format!("{}/object/{}/{}", self.base_url, self.bucket, path);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.service_key)
            .header("Content-Type", content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await?;

        check_status(resp).await?;
        tracing::info!("📦 Uploaded {} to bucket {}", path, self.bucket);

        Ok(self.public_url(path))
    }
}

/// Object path for a job attachment: `jobs/{job_id}/{media_type}/{file_name}`.
/// Both segments are reduced to a safe character set.
pub fn job_media_path(job_id: i64, media_type: &str, file_name: &str) -> String {
    let media_type: String = media_type
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    let file_name: String = file_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    // Collapses dot runs and drops leading/trailing dots
    let file_name = file_name
        .split('.')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(".");
    format!("jobs/{job_id}/{media_type}/{file_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_ignores_trailing_slash() {
        let client = StorageClient::new(reqwest::Client::new(), "https://store.example/storage/v1/", "media", "key");
        assert_eq!(
            client.public_url("jobs/1/photo.jpg"),
            "https://store.example/storage/v1/object/public/media/jobs/1/photo.jpg"
        );
    }

    #[test]
    fn media_path_sanitizes_file_names() {
        assert_eq!(
            job_media_path(7, "front_of_house", "my house (1).jpg"),
            "jobs/7/front_of_house/my_house__1_.jpg"
        );
    }

    #[test]
    fn media_path_stays_under_the_job_prefix() {
        let path = job_media_path(7, "../../profiles/victim", "avatar.png");
        assert!(path.starts_with("jobs/7/"));
        assert!(!path.contains(".."));
        assert_eq!(path.matches('/').count(), 3);

        let path = job_media_path(7, "after", "../../secret");
        assert_eq!(path, "jobs/7/after/_._secret");
    }
}

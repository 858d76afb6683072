// src/services/job_service.rs

use crate::{
    clients::{storage::job_media_path, StorageClient},
    common::{error::AppError, params::parse_id},
    db::{JobRepository, JobSource},
    models::job::{Job, Media, UploadMediaQuery, JOB_STATUSES},
};
use validator::Validate;

/// Looks up the job named by a `jobId` route parameter.
/// `None` for malformed ids and for jobs that don't exist.
pub async fn load_job(source: &dyn JobSource, raw_id: &str) -> Result<Option<Job>, AppError> {
    let Some(job_id) = parse_id(raw_id) else {
        return Ok(None);
    };
    source.find_job(job_id).await
}

/// Lowercases and checks a requested status against the known ones.
pub fn normalize_status(status: &str) -> Result<String, AppError> {
    let status = status.trim().to_lowercase();
    if JOB_STATUSES.contains(&status.as_str()) {
        Ok(status)
    } else {
        Err(AppError::UnknownJobStatus(status))
    }
}

/// The job screen's own data path: every call refetches, nothing is cached.
#[derive(Clone)]
pub struct JobService {
    repo: JobRepository,
    storage: StorageClient,
}

impl JobService {
    pub fn new(repo: JobRepository, storage: StorageClient) -> Self {
        Self { repo, storage }
    }

    pub async fn load(&self, raw_id: &str) -> Result<Option<Job>, AppError> {
        load_job(&self.repo, raw_id).await
    }

    pub async fn update_status(&self, job_id: i64, status: &str) -> Result<(), AppError> {
        let status = normalize_status(status)?;
        if self.repo.update_status(job_id, &status).await? == 0 {
            return Err(AppError::JobNotFound);
        }
        tracing::info!("🛠️ Job {} moved to {}", job_id, status);
        Ok(())
    }

    /// Uploads the file to the object store, then records it on the job.
    pub async fn attach_media(
        &self,
        job_id: i64,
        upload: &UploadMediaQuery,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Media, AppError> {
        upload.validate()?;
        let path = job_media_path(job_id, &upload.media_type, &upload.file_name);
        let url = self.storage.upload(&path, content_type, bytes).await?;
        self.repo.insert_media(job_id, &upload.media_type, &url).await
    }
}

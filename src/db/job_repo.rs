// src/db/job_repo.rs

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::queries::JOB_DETAIL,
    models::job::{Job, Media},
};

/// Single-job reads used by the job screen.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn find_job(&self, job_id: i64) -> Result<Option<Job>, AppError>;
}

#[derive(Clone)]
pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns how many rows changed (0 when the job does not exist).
    pub async fn update_status(&self, job_id: i64, status: &str) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE jobs
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(job_id)
        .bind(status)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn insert_media(
        &self,
        job_id: i64,
        media_type: &str,
        url: &str,
    ) -> Result<Media, AppError> {
        sqlx::query_as::<_, Media>(
            r#"
            INSERT INTO job_media (job_id, media_type, url)
            VALUES ($1, $2, $3)
            RETURNING id, media_type, url, created_at
            "#,
        )
        .bind(job_id)
        .bind(media_type)
        .bind(url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // FK violation: the job is gone
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::JobNotFound;
                }
            }
            e.into()
        })
    }
}

#[async_trait]
impl JobSource for JobRepository {
    async fn find_job(&self, job_id: i64) -> Result<Option<Job>, AppError> {
        let row = sqlx::query_scalar::<_, Value>(JOB_DETAIL.as_str())
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(json) => Ok(Some(serde_json::from_value(json)?)),
            None => Ok(None),
        }
    }
}

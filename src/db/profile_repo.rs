// src/db/profile_repo.rs

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, db::queries::PROFILE_SNAPSHOT, models::profile::Profile};

/// Where session snapshots come from. The Postgres repository is the only
/// production implementation.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// `Ok(None)` when no profile exists for the identifier.
    async fn fetch_snapshot(&self, profile_id: Uuid) -> Result<Option<Profile>, AppError>;
}

#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileSource for ProfileRepository {
    // One round trip: the whole nested snapshot comes back as a single JSON value
    async fn fetch_snapshot(&self, profile_id: Uuid) -> Result<Option<Profile>, AppError> {
        let row = sqlx::query_scalar::<_, Value>(PROFILE_SNAPSHOT.as_str())
            .bind(profile_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(json) => Ok(Some(serde_json::from_value(json)?)),
            None => Ok(None),
        }
    }
}

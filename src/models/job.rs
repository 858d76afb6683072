// src/models/job.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// Statuses the app moves a job through. Stored as text; anything else the
// backend holds is still decoded, it just can't be set from here.
pub const JOB_STATUSES: [&str; 7] = [
    "new",
    "scheduled",
    "pending",
    "approved",
    "installed",
    "complete",
    "cancelled",
];

// Kinds of file an installer can attach to a job. Also the folder name in
// the object store, so nothing outside this list reaches a storage path.
pub const JOB_MEDIA_TYPES: [&str; 6] = [
    "before",
    "during",
    "after",
    "permit",
    "signed_contract",
    "other",
];

// Statuses shown on the installer dashboard
pub const IN_PROGRESS_STATUSES: [&str; 4] = ["new", "scheduled", "pending", "approved"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub customer_id: Option<i64>,
    pub location_id: i64,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub profiles: Vec<JobProfile>,
    #[serde(default)]
    pub products: Vec<JobProduct>,
    #[serde(default)]
    pub media: Vec<Media>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl Job {
    pub fn is_in_progress(&self) -> bool {
        IN_PROGRESS_STATUSES.contains(&self.status.as_str())
    }

    pub fn has_role(&self, profile_id: Uuid, role: JobRole) -> bool {
        self.profiles
            .iter()
            .any(|p| p.profile_id == profile_id && p.role == role)
    }

    pub fn profiles_with_role(&self, role: JobRole) -> impl Iterator<Item = Uuid> + '_ {
        self.profiles
            .iter()
            .filter(move |p| p.role == role)
            .map(|p| p.profile_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobRole {
    Closer,
    Installer,
    Setter,
    #[serde(other)]
    Other,
}

// Role-tagged profile assigned to a job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobProfile {
    pub profile_id: Uuid,
    pub role: JobRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobProduct {
    pub id: i64,
    pub product_id: i64,
    pub units: i32,
    // Catalog definition of the product
    pub product: Option<CatalogProduct>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: i64,
    pub name: String,
    pub unit_label: Option<String>,
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Media {
    pub id: i64,
    pub media_type: String,
    pub url: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub amount: Decimal,
    pub method: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize)]
pub struct UpdateJobStatusPayload {
    pub status: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UploadMediaQuery {
    #[validate(custom(function = "known_media_type"))]
    pub media_type: String,
    #[validate(custom(function = "usable_file_name"))]
    pub file_name: String,
}

fn known_media_type(media_type: &str) -> Result<(), ValidationError> {
    if JOB_MEDIA_TYPES.contains(&media_type) {
        return Ok(());
    }
    let mut error = ValidationError::new("media_type");
    error.message = Some("Unknown media type.".into());
    Err(error)
}

// Needs at least one character besides dots and whitespace
fn usable_file_name(file_name: &str) -> Result<(), ValidationError> {
    if file_name.chars().any(|c| c != '.' && !c.is_whitespace()) {
        return Ok(());
    }
    let mut error = ValidationError::new("file_name");
    error.message = Some("A file name is required.".into());
    Err(error)
}

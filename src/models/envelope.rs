// src/models/envelope.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Signature envelope as listed by the internal documents API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub id: String,
    pub status: String,
    pub subject: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
}

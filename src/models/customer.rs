// src/models/customer.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::{bid::Bid, job::Job, location::Appointment};

// --- ENUMS ---

// Stage of a customer in the sales pipeline.
// Declaration order is the display order after NEW.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DispositionStatus {
    New,
    Scheduled,
    NoShow,
    CancelledAtDoor,
    PitchedNotClosed,
    PitchedPending,
    PitchedClosed,
    PitchedFollowUp,
}

impl DispositionStatus {
    pub const ALL: [DispositionStatus; 8] = [
        DispositionStatus::New,
        DispositionStatus::Scheduled,
        DispositionStatus::NoShow,
        DispositionStatus::CancelledAtDoor,
        DispositionStatus::PitchedNotClosed,
        DispositionStatus::PitchedPending,
        DispositionStatus::PitchedClosed,
        DispositionStatus::PitchedFollowUp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DispositionStatus::New => "NEW",
            DispositionStatus::Scheduled => "SCHEDULED",
            DispositionStatus::NoShow => "NO_SHOW",
            DispositionStatus::CancelledAtDoor => "CANCELLED_AT_DOOR",
            DispositionStatus::PitchedNotClosed => "PITCHED_NOT_CLOSED",
            DispositionStatus::PitchedPending => "PITCHED_PENDING",
            DispositionStatus::PitchedClosed => "PITCHED_CLOSED",
            DispositionStatus::PitchedFollowUp => "PITCHED_FOLLOW_UP",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DispositionStatus::New => "New",
            DispositionStatus::Scheduled => "Scheduled",
            DispositionStatus::NoShow => "No Show",
            DispositionStatus::CancelledAtDoor => "Cancelled at Door",
            DispositionStatus::PitchedNotClosed => "Pitched - Not Closed",
            DispositionStatus::PitchedPending => "Pitched - Pending",
            DispositionStatus::PitchedClosed => "Pitched - Closed",
            DispositionStatus::PitchedFollowUp => "Pitched - Follow Up",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }
}

// --- CUSTOMER ---

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub location_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,

    // Kept raw: the backend does not constrain it.
    pub disposition_status: Option<String>,

    pub closer_id: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub bids: Vec<Bid>,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Customer {
    /// Display disposition; unknown or missing values read as `New`.
    pub fn disposition(&self) -> DispositionStatus {
        self.disposition_status
            .as_deref()
            .and_then(DispositionStatus::parse)
            .unwrap_or(DispositionStatus::New)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: i64,
    pub customer_id: i64,
    pub author_id: Option<Uuid>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

// --- PAYLOADS ---

// Partial update: only the fields present are written.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CustomerPatch {
    #[validate(length(min = 1, message = "First name cannot be empty."))]
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email(message = "The e-mail address is invalid."))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub disposition_status: Option<DispositionStatus>,
    pub closer_id: Option<Uuid>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.zip.is_none()
            && self.disposition_status.is_none()
            && self.closer_id.is_none()
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateNotePayload {
    #[validate(length(min = 1, message = "The note cannot be empty."))]
    pub body: String,
}

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_window"))]
pub struct ScheduleAppointmentPayload {
    pub closer_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

fn validate_window(payload: &ScheduleAppointmentPayload) -> Result<(), ValidationError> {
    if payload.end_time > payload.start_time {
        return Ok(());
    }
    let mut error = ValidationError::new("range");
    error.message = Some("The appointment must end after it starts.".into());
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer_with(status: Option<&str>) -> Customer {
        Customer {
            id: 1,
            disposition_status: status.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn known_dispositions_parse() {
        assert_eq!(
            customer_with(Some("PITCHED_FOLLOW_UP")).disposition(),
            DispositionStatus::PitchedFollowUp
        );
        assert_eq!(customer_with(Some("NO_SHOW")).disposition(), DispositionStatus::NoShow);
    }

    #[test]
    fn unknown_or_missing_disposition_reads_as_new() {
        assert_eq!(customer_with(Some("LOST")).disposition(), DispositionStatus::New);
        assert_eq!(customer_with(Some("scheduled")).disposition(), DispositionStatus::New);
        assert_eq!(customer_with(None).disposition(), DispositionStatus::New);
    }

    #[test]
    fn serde_names_match_as_str() {
        for status in DispositionStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, serde_json::Value::String(status.as_str().to_string()));
        }
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(CustomerPatch::default().is_empty());
        let patch = CustomerPatch {
            zip: Some("84101".into()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn appointment_window_must_be_positive() {
        let start = Utc::now();
        let payload = ScheduleAppointmentPayload { closer_id: None, start_time: start, end_time: start };
        let errors = payload.validate().unwrap_err();
        assert!(errors.errors().contains_key("__all__"));

        let backwards = ScheduleAppointmentPayload {
            closer_id: None,
            start_time: start,
            end_time: start - chrono::Duration::minutes(30),
        };
        assert!(backwards.validate().is_err());

        let payload = ScheduleAppointmentPayload {
            closer_id: None,
            start_time: start,
            end_time: start + chrono::Duration::hours(1),
        };
        assert!(payload.validate().is_ok());
    }
}

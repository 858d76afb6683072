// src/models/location.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::{
    customer::Customer,
    job::Job,
    profile::{ProfileSummary, RoleFlags},
};

// ---
// 1. Location (the business site)
// ---
// A full snapshot: every nested collection comes from the same fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub profiles: Vec<LocationMember>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub channels: Vec<Channel>,
}

impl Location {
    pub fn member(&self, profile_id: Uuid) -> Option<&LocationMember> {
        self.profiles.iter().find(|m| m.profile.id == profile_id)
    }
}

// Any profile's membership at a location (closers, setters, installers...)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationMember {
    pub id: i64,
    #[serde(flatten)]
    pub roles: RoleFlags,
    pub profile: ProfileSummary,
}

// ---
// 2. Appointment
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    pub id: i64,
    pub customer_id: i64,
    pub closer_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

// ---
// 3. Channel (a named conversation)
// ---
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub members: Vec<ProfileSummary>,
}

// ---
// 4. SelectedLocation
// ---
// The currently selected location merged with the caller's role flags.
#[derive(Debug, Serialize)]
pub struct SelectedLocation<'a> {
    #[serde(flatten)]
    pub roles: RoleFlags,
    #[serde(flatten)]
    pub location: &'a Location,
}

// Entry of the location switcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationOption {
    pub id: i64,
    pub name: String,
    pub selected: bool,
}

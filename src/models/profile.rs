// src/models/profile.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::location::Location;

// ---
// 1. Profile (the signed-in person)
// ---
// Fetched once per session together with every location it belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub location_profiles: Vec<LocationProfile>,
}

impl Profile {
    pub fn membership(&self, location_id: i64) -> Option<&LocationProfile> {
        self.location_profiles
            .iter()
            .find(|lp| lp.location_id == location_id)
    }
}

// ---
// 2. RoleFlags
// ---
// The closer/setter/installer roles plus the capability flags that gate
// which dashboards a member can open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFlags {
    #[serde(default)]
    pub is_closer: bool,
    #[serde(default)]
    pub is_setter: bool,
    #[serde(default)]
    pub is_installer: bool,
    #[serde(default)]
    pub is_manager: bool,
    #[serde(default)]
    pub is_admin: bool,
}

impl RoleFlags {
    pub fn can_view_leaderboard(&self) -> bool {
        self.is_closer || self.is_setter || self.is_manager || self.is_admin
    }

    pub fn can_view_installer_dashboard(&self) -> bool {
        self.is_installer || self.is_manager || self.is_admin
    }
}

// ---
// 3. LocationProfile (Profile <-> Location join)
// ---
// The caller's own membership, carrying the full location snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationProfile {
    pub id: i64,
    pub location_id: i64,
    #[serde(flatten)]
    pub roles: RoleFlags,
    #[serde(default)]
    pub location: Location,
}

// Minimal profile shape embedded in members, channels, and dashboards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

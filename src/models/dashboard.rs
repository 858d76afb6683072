// src/models/dashboard.rs

use serde::Serialize;
use uuid::Uuid;

use crate::models::{
    customer::{Customer, DispositionStatus},
    job::Job,
    profile::ProfileSummary,
};

// Customers sharing one disposition
#[derive(Debug, Serialize)]
pub struct DispositionGroup<'a> {
    pub status: DispositionStatus,
    pub label: &'static str,
    pub customers: Vec<&'a Customer>,
}

// One row of the closer leaderboard
#[derive(Debug, Serialize)]
pub struct LeaderboardEntry<'a> {
    pub profile: &'a ProfileSummary,
    pub job_count: usize,
}

// In-progress jobs of one installer
#[derive(Debug, Serialize)]
pub struct InstallerJobs<'a> {
    pub profile_id: Uuid,
    // None when the installer is not (or no longer) a member of the location
    pub profile: Option<&'a ProfileSummary>,
    pub jobs: Vec<&'a Job>,
}

// One named line of the bid requirement checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementCheck {
    pub label: &'static str,
    pub passed: bool,
}

// src/services/location_store.rs

use std::sync::Arc;

use crate::models::{
    location::{LocationOption, SelectedLocation},
    profile::{LocationProfile, Profile},
};

/// The selected location of one session, over an immutable profile snapshot.
///
/// `location()` is always defined: a profile without memberships sees an
/// empty location instead of nothing.
#[derive(Debug, Clone)]
pub struct LocationStore {
    profile: Arc<Profile>,
    selected: Option<usize>,
    empty: LocationProfile,
}

impl LocationStore {
    /// Selects the first location of the profile.
    pub fn new(profile: Arc<Profile>) -> Self {
        let selected = if profile.location_profiles.is_empty() { None } else { Some(0) };
        Self {
            profile,
            selected,
            empty: LocationProfile::default(),
        }
    }

    /// Starts from a previously chosen location, falling back to the first.
    pub fn with_selection(profile: Arc<Profile>, location_id: Option<i64>) -> Self {
        let mut store = Self::new(profile);
        if let Some(id) = location_id {
            store.change_location(id);
        }
        store
    }

    fn membership(&self) -> &LocationProfile {
        self.selected
            .and_then(|idx| self.profile.location_profiles.get(idx))
            .unwrap_or(&self.empty)
    }

    pub fn location(&self) -> SelectedLocation<'_> {
        let membership = self.membership();
        SelectedLocation {
            roles: membership.roles,
            location: &membership.location,
        }
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected
            .and_then(|idx| self.profile.location_profiles.get(idx))
            .map(|lp| lp.location_id)
    }

    /// Switches to `location_id` if the profile belongs to it.
    /// Unknown ids leave the selection as it was; returns whether it switched.
    pub fn change_location(&mut self, location_id: i64) -> bool {
        match self
            .profile
            .location_profiles
            .iter()
            .position(|lp| lp.location_id == location_id)
        {
            Some(idx) => {
                self.selected = Some(idx);
                true
            }
            None => {
                tracing::debug!("Ignoring unknown location {}", location_id);
                false
            }
        }
    }

    /// Takes a newly fetched snapshot. Fetching itself belongs to the session
    /// resolver; the selection carries over when the location still exists.
    pub fn refresh_data(&mut self, profile: Arc<Profile>) {
        let previous = self.selected_id();
        *self = Self::with_selection(profile, previous);
    }

    pub fn locations(&self) -> Vec<LocationOption> {
        let selected = self.selected_id();
        self.profile
            .location_profiles
            .iter()
            .map(|lp| LocationOption {
                id: lp.location_id,
                name: lp.location.name.clone(),
                selected: Some(lp.location_id) == selected,
            })
            .collect()
    }
}

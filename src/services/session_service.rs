// src/services/session_service.rs

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    db::ProfileSource,
    models::{auth::SessionUser, profile::Profile},
    services::location_store::LocationStore,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FetchStatus {
    Loading,
    Ready { fetched_at: DateTime<Utc> },
    Failed { reason: String, failed_at: DateTime<Utc> },
}

/// What one session currently sees. The profile is either the last good
/// snapshot or the empty default; `status` tells the two apart.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub profile: Arc<Profile>,
    pub status: FetchStatus,
    pub selected_location_id: Option<i64>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            profile: Arc::new(Profile::default()),
            status: FetchStatus::Loading,
            selected_location_id: None,
        }
    }
}

impl SessionState {
    pub fn location_store(&self) -> LocationStore {
        LocationStore::with_selection(self.profile.clone(), self.selected_location_id)
    }
}

// One sign-in: the same profile signing in again gets a new entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SessionKey {
    profile_id: Uuid,
    issued_at: i64,
}

impl From<&SessionUser> for SessionKey {
    fn from(user: &SessionUser) -> Self {
        Self { profile_id: user.id, issued_at: user.issued_at }
    }
}

struct CachedSession {
    state: SessionState,
    expires_at: i64,
}

/// Resolves sessions to profile snapshots and keeps the latest one per
/// sign-in. Fetch failures never propagate: they degrade to the previous
/// (or empty) snapshot with a `Failed` status.
///
/// Entries whose token has expired are dropped on the next write.
#[derive(Clone)]
pub struct SessionService {
    source: Arc<dyn ProfileSource>,
    sessions: Arc<RwLock<HashMap<SessionKey, CachedSession>>>,
}

impl SessionService {
    pub fn new(source: Arc<dyn ProfileSource>) -> Self {
        Self {
            source,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Cached state for the session, fetching it on first use.
    pub async fn current(&self, user: &SessionUser) -> SessionState {
        if let Some(cached) = self.sessions.read().await.get(&SessionKey::from(user)) {
            return cached.state.clone();
        }
        self.refresh(user).await
    }

    /// Refetches the whole snapshot and replaces the cached one.
    pub async fn refresh(&self, user: &SessionUser) -> SessionState {
        let fetched = self.source.fetch_snapshot(user.id).await;

        let mut sessions = self.sessions.write().await;
        evict_expired(&mut sessions);
        let previous = sessions
            .remove(&SessionKey::from(user))
            .map(|cached| cached.state)
            .unwrap_or_default();

        let state = match fetched {
            Ok(Some(profile)) => {
                tracing::info!(
                    "🔄 Session {} refreshed ({} locations)",
                    user.id,
                    profile.location_profiles.len()
                );
                let profile = Arc::new(profile);
                let mut store = previous.location_store();
                store.refresh_data(profile.clone());
                SessionState {
                    profile,
                    status: FetchStatus::Ready { fetched_at: Utc::now() },
                    selected_location_id: store.selected_id(),
                }
            }
            Ok(None) => {
                tracing::warn!("No profile found for session {}", user.id);
                SessionState {
                    profile: Arc::new(Profile::default()),
                    status: FetchStatus::Failed {
                        reason: "profile not found".to_string(),
                        failed_at: Utc::now(),
                    },
                    selected_location_id: None,
                }
            }
            Err(e) => {
                tracing::warn!("Snapshot fetch failed for session {}: {}", user.id, e);
                SessionState {
                    status: FetchStatus::Failed {
                        reason: e.to_string(),
                        failed_at: Utc::now(),
                    },
                    ..previous
                }
            }
        };

        sessions.insert(
            SessionKey::from(user),
            CachedSession { state: state.clone(), expires_at: user.expires_at },
        );
        state
    }

    /// Persists a location switch for the session. Unknown ids are ignored.
    pub async fn select_location(&self, user: &SessionUser, location_id: i64) -> SessionState {
        let current = self.current(user).await;
        let mut store = current.location_store();
        store.change_location(location_id);

        let mut sessions = self.sessions.write().await;
        let cached = sessions
            .entry(SessionKey::from(user))
            .or_insert(CachedSession { state: current, expires_at: user.expires_at });
        cached.state.selected_location_id = store.selected_id();
        cached.state.clone()
    }

    /// Drops the cached snapshot (sign-out).
    pub async fn end(&self, user: &SessionUser) {
        self.sessions.write().await.remove(&SessionKey::from(user));
    }
}

fn evict_expired(sessions: &mut HashMap<SessionKey, CachedSession>) {
    let now = Utc::now().timestamp();
    let before = sessions.len();
    sessions.retain(|_, cached| cached.expires_at > now);
    if sessions.len() < before {
        tracing::debug!("Evicted {} expired sessions", before - sessions.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::error::AppError,
        models::{location::Location, profile::LocationProfile},
    };
    use async_trait::async_trait;
    use std::sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    };

    struct FakeSource {
        profile: Mutex<Option<Profile>>,
        fail: AtomicBool,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn with(profile: Option<Profile>) -> Arc<Self> {
            Arc::new(Self {
                profile: Mutex::new(profile),
                fail: AtomicBool::new(false),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ProfileSource for FakeSource {
        async fn fetch_snapshot(&self, _profile_id: Uuid) -> Result<Option<Profile>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut));
            }
            Ok(self.profile.lock().unwrap().clone())
        }
    }

    fn signed_in(id: Uuid) -> SessionUser {
        let now = Utc::now().timestamp();
        SessionUser { id, token: String::new(), issued_at: now, expires_at: now + 3600 }
    }

    fn profile_with_locations(ids: &[i64]) -> Profile {
        Profile {
            full_name: Some("Sam".into()),
            location_profiles: ids
                .iter()
                .map(|id| LocationProfile {
                    id: *id,
                    location_id: *id,
                    location: Location { id: *id, name: format!("Site {id}"), ..Default::default() },
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn fetches_once_then_serves_cached_state() {
        let source = FakeSource::with(Some(profile_with_locations(&[1])));
        let service = SessionService::new(source.clone());
        let user = signed_in(Uuid::new_v4());

        let first = service.current(&user).await;
        let second = service.current(&user).await;

        assert!(matches!(first.status, FetchStatus::Ready { .. }));
        assert_eq!(second.profile.full_name.as_deref(), Some("Sam"));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_first_fetch_degrades_to_empty_profile() {
        let source = FakeSource::with(None);
        source.fail.store(true, Ordering::SeqCst);
        let service = SessionService::new(source);

        let state = service.current(&signed_in(Uuid::new_v4())).await;

        assert!(matches!(state.status, FetchStatus::Failed { .. }));
        assert!(state.profile.location_profiles.is_empty());
        assert_eq!(state.location_store().location().location.id, 0);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_last_good_snapshot() {
        let source = FakeSource::with(Some(profile_with_locations(&[1, 2])));
        let service = SessionService::new(source.clone());
        let user = signed_in(Uuid::new_v4());
        service.current(&user).await;

        source.fail.store(true, Ordering::SeqCst);
        let state = service.refresh(&user).await;

        assert!(matches!(state.status, FetchStatus::Failed { .. }));
        assert_eq!(state.profile.location_profiles.len(), 2);
    }

    #[tokio::test]
    async fn missing_profile_is_reported() {
        let service = SessionService::new(FakeSource::with(None));
        let state = service.current(&signed_in(Uuid::new_v4())).await;
        match state.status {
            FetchStatus::Failed { reason, .. } => assert_eq!(reason, "profile not found"),
            other => panic!("unexpected status {other:?}"),
        }
    }

    #[tokio::test]
    async fn selection_survives_refresh_and_ignores_unknown_ids() {
        let source = FakeSource::with(Some(profile_with_locations(&[1, 2])));
        let service = SessionService::new(source.clone());
        let user = signed_in(Uuid::new_v4());

        let state = service.select_location(&user, 2).await;
        assert_eq!(state.selected_location_id, Some(2));

        let state = service.select_location(&user, 77).await;
        assert_eq!(state.selected_location_id, Some(2));

        *source.profile.lock().unwrap() = Some(profile_with_locations(&[1, 2, 3]));
        let state = service.refresh(&user).await;
        assert_eq!(state.selected_location_id, Some(2));
        assert_eq!(state.location_store().location().location.name, "Site 2");
    }

    #[tokio::test]
    async fn end_forces_a_new_fetch() {
        let source = FakeSource::with(Some(profile_with_locations(&[1])));
        let service = SessionService::new(source.clone());
        let user = signed_in(Uuid::new_v4());

        service.current(&user).await;
        service.end(&user).await;
        service.current(&user).await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn new_sign_in_fetches_a_new_snapshot() {
        let source = FakeSource::with(Some(profile_with_locations(&[])));
        let service = SessionService::new(source.clone());
        let first = signed_in(Uuid::new_v4());

        assert!(service.current(&first).await.profile.location_profiles.is_empty());

        *source.profile.lock().unwrap() = Some(profile_with_locations(&[1]));
        let again = SessionUser { issued_at: first.issued_at + 60, ..first.clone() };
        let state = service.current(&again).await;

        assert_eq!(state.profile.location_profiles.len(), 1);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn expired_sessions_are_evicted() {
        let service = SessionService::new(FakeSource::with(Some(profile_with_locations(&[1]))));
        let now = Utc::now().timestamp();
        let stale = SessionUser {
            id: Uuid::new_v4(),
            token: String::new(),
            issued_at: now - 7200,
            expires_at: now - 3600,
        };
        service.current(&stale).await;
        assert_eq!(service.sessions.read().await.len(), 1);

        let live = signed_in(Uuid::new_v4());
        service.current(&live).await;

        let sessions = service.sessions.read().await;
        assert_eq!(sessions.len(), 1);
        assert!(sessions.contains_key(&SessionKey::from(&live)));
    }
}

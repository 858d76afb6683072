pub mod customers;
pub mod dashboard;
pub mod jobs;
pub mod locations;
pub mod session;

use crate::{
    config::AppState,
    middleware::{auth::AuthenticatedUser, location::LocationOverride},
    services::{location_store::LocationStore, session_service::SessionState},
};

// Session snapshot plus the location this request works in
pub(crate) async fn session_scope(
    app_state: &AppState,
    user: &AuthenticatedUser,
    location: LocationOverride,
) -> (SessionState, LocationStore) {
    let state = app_state.session_service.current(&user.0).await;
    let store = request_location(&state, location);
    (state, store)
}

// The session's selection, switched for this request only when the override
// names one of the profile's locations
pub(crate) fn request_location(state: &SessionState, location: LocationOverride) -> LocationStore {
    let mut store = state.location_store();
    if let Some(id) = location.0 {
        store.change_location(id);
    }
    store
}

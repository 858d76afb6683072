// src/handlers/locations.rs

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    config::AppState,
    handlers::session_scope,
    middleware::{auth::AuthenticatedUser, location::LocationOverride},
};

// GET /api/locations
pub async fn list_locations(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    location: LocationOverride,
) -> impl IntoResponse {
    let (_, store) = session_scope(&app_state, &user, location).await;
    Json(store.locations())
}

// GET /api/location
pub async fn get_location(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    location: LocationOverride,
) -> Response {
    let (_, store) = session_scope(&app_state, &user, location).await;
    Json(store.location()).into_response()
}

#[derive(Debug, Deserialize)]
pub struct SelectLocationPayload {
    pub location_id: i64,
}

#[derive(Debug, Serialize)]
pub struct SelectLocationResponse {
    pub selected_location_id: Option<i64>,
    pub applied: bool,
}

// POST /api/location/select
// Unknown ids are not an error: the selection just stays where it was.
pub async fn select_location(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<SelectLocationPayload>,
) -> impl IntoResponse {
    let state = app_state
        .session_service
        .select_location(&user.0, payload.location_id)
        .await;

    Json(SelectLocationResponse {
        applied: state.selected_location_id == Some(payload.location_id),
        selected_location_id: state.selected_location_id,
    })
}

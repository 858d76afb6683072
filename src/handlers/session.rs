// src/handlers/session.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{config::AppState, middleware::auth::AuthenticatedUser};

// GET /api/session
pub async fn get_session(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> impl IntoResponse {
    Json(app_state.session_service.current(&user.0).await)
}

// POST /api/session/refresh
pub async fn refresh_session(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> impl IntoResponse {
    Json(app_state.session_service.refresh(&user.0).await)
}

// DELETE /api/session
pub async fn end_session(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> impl IntoResponse {
    app_state.session_service.end(&user.0).await;
    StatusCode::NO_CONTENT
}

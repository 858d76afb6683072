// src/handlers/dashboard.rs

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::session_scope,
    middleware::{auth::AuthenticatedUser, location::LocationOverride},
    models::dashboard::RequirementCheck,
    services::{
        bid_checklist::{bid_checklist, is_complete},
        customer_service::find_bid,
        dashboard_service::{closer_leaderboard, installer_dashboard},
    },
};

// GET /api/dashboard/leaderboard
pub async fn get_leaderboard(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    location: LocationOverride,
) -> Result<Response, AppError> {
    let (_, store) = session_scope(&app_state, &user, location).await;
    let selected = store.location();

    if !selected.roles.can_view_leaderboard() {
        return Err(AppError::Forbidden("viewing the leaderboard"));
    }

    Ok(Json(closer_leaderboard(selected.location)).into_response())
}

// GET /api/dashboard/installers
pub async fn get_installer_dashboard(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    location: LocationOverride,
) -> Result<Response, AppError> {
    let (_, store) = session_scope(&app_state, &user, location).await;
    let selected = store.location();

    if !selected.roles.can_view_installer_dashboard() {
        return Err(AppError::Forbidden("viewing the installer dashboard"));
    }

    Ok(Json(installer_dashboard(selected.location)).into_response())
}

#[derive(Debug, Serialize)]
pub struct ChecklistResponse {
    pub bid_id: i64,
    pub complete: bool,
    pub checks: Vec<RequirementCheck>,
}

// GET /api/bids/{bid_id}/checklist
pub async fn get_bid_checklist(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    location: LocationOverride,
    Path(bid_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (_, store) = session_scope(&app_state, &user, location).await;
    let bid = find_bid(store.location().location, &bid_id).ok_or(AppError::BidNotFound)?;

    let checks = bid_checklist(bid);
    Ok(Json(ChecklistResponse {
        bid_id: bid.id,
        complete: is_complete(&checks),
        checks,
    }))
}

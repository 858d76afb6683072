// src/handlers/customers.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::session_scope,
    middleware::{auth::AuthenticatedUser, location::LocationOverride},
    models::customer::{CreateNotePayload, CustomerPatch, ScheduleAppointmentPayload},
    services::{customer_service::find_customer, dashboard_service::group_by_disposition},
};

// =============================================================================
//  READS (from the session snapshot)
// =============================================================================

// GET /api/customers
pub async fn list_customers(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    location: LocationOverride,
) -> Response {
    let (_, store) = session_scope(&app_state, &user, location).await;
    let groups = group_by_disposition(&store.location().location.customers);
    Json(groups).into_response()
}

// GET /api/customers/{customer_id}
pub async fn get_customer(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    location: LocationOverride,
    Path(customer_id): Path<String>,
) -> Result<Response, AppError> {
    let (_, store) = session_scope(&app_state, &user, location).await;
    let customer = find_customer(store.location().location, &customer_id)
        .ok_or(AppError::CustomerNotFound)?;

    Ok(Json(customer).into_response())
}

// =============================================================================
//  WRITES (straight to the backend, then a full refetch)
// =============================================================================

// Resolves the route parameter against the caller's selected location.
async fn scoped_customer_id(
    app_state: &AppState,
    user: &AuthenticatedUser,
    location: LocationOverride,
    raw_id: &str,
) -> Result<i64, AppError> {
    let (_, store) = session_scope(app_state, user, location).await;
    find_customer(store.location().location, raw_id)
        .map(|c| c.id)
        .ok_or(AppError::CustomerNotFound)
}

// PATCH /api/customers/{customer_id}
pub async fn update_customer(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    location: LocationOverride,
    Path(customer_id): Path<String>,
    Json(patch): Json<CustomerPatch>,
) -> Result<Response, AppError> {
    let id = scoped_customer_id(&app_state, &user, location, &customer_id).await?;

    app_state.customer_service.update_customer(id, &patch).await?;

    // Observe the write through a fresh snapshot
    app_state.session_service.refresh(&user.0).await;
    let (_, store) = session_scope(&app_state, &user, location).await;
    let customer = find_customer(store.location().location, &customer_id)
        .ok_or(AppError::CustomerNotFound)?;

    Ok(Json(customer).into_response())
}

// POST /api/customers/{customer_id}/notes
pub async fn add_note(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    location: LocationOverride,
    Path(customer_id): Path<String>,
    Json(payload): Json<CreateNotePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let id = scoped_customer_id(&app_state, &user, location, &customer_id).await?;

    let note = app_state
        .customer_service
        .add_note(id, user.0.id, &payload.body)
        .await?;
    app_state.session_service.refresh(&user.0).await;

    Ok((StatusCode::CREATED, Json(note)))
}

// POST /api/customers/{customer_id}/appointments
pub async fn schedule_appointment(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    location: LocationOverride,
    Path(customer_id): Path<String>,
    Json(payload): Json<ScheduleAppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let id = scoped_customer_id(&app_state, &user, location, &customer_id).await?;

    let appointment = app_state
        .customer_service
        .schedule_appointment(id, &payload)
        .await?;
    app_state.session_service.refresh(&user.0).await;

    Ok((StatusCode::CREATED, Json(appointment)))
}

// GET /api/customers/{customer_id}/envelopes
pub async fn list_envelopes(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    location: LocationOverride,
    Path(customer_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = scoped_customer_id(&app_state, &user, location, &customer_id).await?;

    let envelopes = app_state
        .envelope_client
        .list_for_customer(&user.0.token, id)
        .await?;

    Ok(Json(envelopes))
}

// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Single error type for the gateway, the stores and the handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Invalid token")]
    InvalidToken,

    #[error("Missing capability: {0}")]
    Forbidden(&'static str),

    #[error("No customer found")]
    CustomerNotFound,

    #[error("No job found")]
    JobNotFound,

    #[error("No bid found")]
    BidNotFound,

    #[error("Nothing to update")]
    EmptyPatch,

    #[error("Unknown job status: {0}")]
    UnknownJobStatus(String),

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    // The nested snapshot came back in a shape we could not decode.
    #[error("Snapshot decode error: {0}")]
    SnapshotDecode(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Internal server error")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::EmptyPatch | AppError::UnknownJobStatus(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::InvalidToken | AppError::JwtError(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::CustomerNotFound | AppError::JobNotFound | AppError::BidNotFound => {
                StatusCode::NOT_FOUND
            }
            AppError::Upstream { .. } | AppError::HttpError(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_message = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (status, body).into_response();
            }
            AppError::InvalidToken | AppError::JwtError(_) => {
                "Missing or invalid authentication token.".to_string()
            }
            AppError::Forbidden(capability) => {
                format!("Your role at this location does not allow {capability}.")
            }
            AppError::CustomerNotFound
            | AppError::JobNotFound
            | AppError::BidNotFound
            | AppError::EmptyPatch
            | AppError::UnknownJobStatus(_) => self.to_string(),
            ref e @ (AppError::Upstream { .. } | AppError::HttpError(_)) => {
                tracing::error!("Upstream call failed: {}", e);
                "An upstream service failed.".to_string()
            }
            // Database, decode and anything unexpected become 500s.
            ref e => {
                tracing::error!("Internal server error: {}", e);
                "An unexpected error occurred.".to_string()
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_misses_map_to_not_found() {
        assert_eq!(AppError::CustomerNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::JobNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::CustomerNotFound.to_string(), "No customer found");
    }

    #[test]
    fn upstream_failures_are_bad_gateway() {
        let err = AppError::Upstream { status: 503, body: "down".into() };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn database_errors_are_internal() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

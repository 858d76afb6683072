// src/middleware/location.rs

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::common::params::parse_id;

// Per-request location override
const LOCATION_ID_HEADER: &str = "x-location-id";

// `Some(id)` when the header holds a usable id. A missing or malformed header
// is not an error: the session's own selection is used instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationOverride(pub Option<i64>);

impl<S> FromRequestParts<S> for LocationOverride
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(LOCATION_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_id);

        Ok(LocationOverride(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> LocationOverride {
        let mut builder = Request::builder().uri("/api/location");
        if let Some(value) = header {
            builder = builder.header(LOCATION_ID_HEADER, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        LocationOverride::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn reads_numeric_header() {
        assert_eq!(extract(Some("4")).await.0, Some(4));
    }

    #[tokio::test]
    async fn missing_or_malformed_header_is_none() {
        assert_eq!(extract(None).await.0, None);
        assert_eq!(extract(Some("north")).await.0, None);
    }
}

// src/models/auth.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Claims inside the bearer token issued by the hosted auth provider
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject: the session identifier (profile id)
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued at
}

// The authenticated caller. The raw token is kept so it can be forwarded
// to the internal API.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: Uuid,
    pub token: String,
    // Unix seconds from the token. A sign-in issues a new `iat`, so
    // (id, issued_at) names one session.
    pub issued_at: i64,
    pub expires_at: i64,
}

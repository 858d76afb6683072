pub mod auth;
pub mod location;

pub mod auth;
pub mod bid;
pub mod customer;
pub mod dashboard;
pub mod envelope;
pub mod job;
pub mod location;
pub mod profile;

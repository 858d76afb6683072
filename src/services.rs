pub mod auth;
pub mod bid_checklist;
pub mod customer_service;
pub mod dashboard_service;
pub mod job_service;
pub mod location_store;
pub mod session_service;

pub mod queries;
pub mod profile_repo;
pub use profile_repo::{ProfileRepository, ProfileSource};
pub mod customer_repo;
pub use customer_repo::CustomerRepository;
pub mod job_repo;
pub use job_repo::{JobRepository, JobSource};

mod memory;
mod migrations;
mod postgres_application_repository;
mod postgres_identity_store;
mod postgres_job_repository;

pub use memory::*;
pub use migrations::migrations;
pub use postgres_application_repository::PostgresApplicationRepository;
pub use postgres_identity_store::PostgresIdentityStore;
pub use postgres_job_repository::PostgresJobRepository;

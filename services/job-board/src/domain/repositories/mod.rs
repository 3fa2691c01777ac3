mod application_repository;
mod identity_store;
mod job_repository;

pub use application_repository::*;
pub use identity_store::*;
pub use job_repository::*;

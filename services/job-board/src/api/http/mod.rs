//! HTTP 接口

pub mod accounts;
pub mod applications;
pub mod extract;
pub mod health;
pub mod jobs;
pub mod middleware;
pub mod response;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;

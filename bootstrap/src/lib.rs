//! recruit-bootstrap - 统一服务启动骨架

mod infrastructure;
mod retry;
mod runtime;
mod starter;

pub use infrastructure::*;
pub use retry::*;
pub use runtime::*;
pub use starter::*;

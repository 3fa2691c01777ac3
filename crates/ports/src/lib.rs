//! ports - 抽象 trait 层
//!
//! 定义核心业务依赖的基础设施接口

mod file_store;
mod notification;

pub use file_store::*;
pub use notification::*;

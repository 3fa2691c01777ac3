//! job-board - 招聘服务
//!
//! 求职者浏览并投递职位，招聘管理员发布职位并处理投递。

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod wiring;

//! 基础设施层

pub mod file_store;
pub mod notification;
pub mod persistence;

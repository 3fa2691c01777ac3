//! Email 适配器
//!
//! 基于 SMTP 的通知发送端，纯文本正文之外附带 HTML 版本

mod client;
mod template;

pub use client::{EmailClient, EmailMessage};
pub use template::{EmailTemplate, NOTIFICATION_LAYOUT};

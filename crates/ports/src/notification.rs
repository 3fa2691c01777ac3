//! 通知发送 trait 定义

use async_trait::async_trait;
use recruit_errors::AppResult;
use serde::{Deserialize, Serialize};

/// 一封待发送的通知
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub recipient_address: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    pub fn new(
        recipient_address: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            recipient_address: recipient_address.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// 通知发送端
///
/// 调用方只尝试一次，失败只记录日志，不影响业务结果
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// 发送通知
    async fn send(&self, notification: &Notification) -> AppResult<()>;
}

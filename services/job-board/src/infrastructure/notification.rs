//! 仅记录日志的通知发送端，SMTP 未启用时使用

use async_trait::async_trait;
use recruit_errors::AppResult;
use recruit_ports::{Notification, NotificationSink};
use tracing::info;

pub struct LoggingNotificationSink;

#[async_trait]
impl NotificationSink for LoggingNotificationSink {
    async fn send(&self, notification: &Notification) -> AppResult<()> {
        info!(
            recipient = %notification.recipient_address,
            subject = %notification.subject,
            "Email delivery disabled, notification logged"
        );
        Ok(())
    }
}

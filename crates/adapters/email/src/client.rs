//! 邮件客户端实现

use crate::EmailTemplate;
use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use recruit_config::EmailConfig;
use recruit_errors::{AppError, AppResult};
use recruit_ports::{Notification, NotificationSink};
use secrecy::ExposeSecret;
use std::time::Duration;
use tracing::{debug, info};

/// 邮件消息
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: Option<String>,
    pub text_body: String,
}

/// SMTP 邮件客户端
pub struct EmailClient {
    config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
    template: EmailTemplate,
}

impl EmailClient {
    pub fn new(config: EmailConfig) -> AppResult<Self> {
        let transport = Self::build_transport(&config)?;
        Ok(Self {
            config,
            transport,
            template: EmailTemplate::builtin()?,
        })
    }

    /// 替换默认模板
    pub fn with_template(mut self, template: EmailTemplate) -> Self {
        self.template = template;
        self
    }

    /// 构建 SMTP 传输
    fn build_transport(config: &EmailConfig) -> AppResult<AsyncSmtpTransport<Tokio1Executor>> {
        let credentials = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().clone(),
        );

        let builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host).map_err(
                |e| AppError::internal(format!("Failed to create SMTP transport: {}", e)),
            )?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
        };

        Ok(builder
            .port(config.smtp_port)
            .credentials(credentials)
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build())
    }

    /// 构建邮件消息
    fn build_message(&self, msg: &EmailMessage) -> AppResult<Message> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse()
            .map_err(|e| AppError::internal(format!("Invalid from address: {}", e)))?;

        let to = msg
            .to
            .parse()
            .map_err(|e| AppError::validation(format!("Invalid to address: {}", e)))?;

        let text_part = SinglePart::builder()
            .header(header::ContentType::TEXT_PLAIN)
            .body(msg.text_body.clone());

        let body = match &msg.html_body {
            Some(html) => MultiPart::alternative().singlepart(text_part).singlepart(
                SinglePart::builder()
                    .header(header::ContentType::TEXT_HTML)
                    .body(html.clone()),
            ),
            None => MultiPart::alternative().singlepart(text_part),
        };

        Message::builder()
            .from(from)
            .to(to)
            .subject(&msg.subject)
            .multipart(body)
            .map_err(|e| AppError::internal(format!("Failed to build message: {}", e)))
    }
}

#[async_trait::async_trait]
impl NotificationSink for EmailClient {
    async fn send(&self, notification: &Notification) -> AppResult<()> {
        debug!(
            to = %notification.recipient_address,
            subject = %notification.subject,
            "Sending notification email"
        );

        let html = self
            .template
            .render_notification(&notification.subject, &notification.body)?;
        let message = self.build_message(&EmailMessage {
            to: notification.recipient_address.clone(),
            subject: notification.subject.clone(),
            html_body: Some(html),
            text_body: notification.body.clone(),
        })?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::external_service(format!("Failed to send email: {}", e)))?;

        info!(
            to = %notification.recipient_address,
            subject = %notification.subject,
            "Notification email sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EmailConfig {
        EmailConfig {
            enabled: true,
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            username: "user@example.com".to_string(),
            password: secrecy::Secret::new("password".to_string()),
            from_email: "noreply@example.com".to_string(),
            from_name: "Job Portal".to_string(),
            use_tls: false,
            timeout_secs: 30,
        }
    }

    #[tokio::test]
    async fn test_build_message() {
        let client = EmailClient::new(config()).unwrap();

        let msg = EmailMessage {
            to: "test@example.com".to_string(),
            subject: "Application Status Update - Rust Engineer".to_string(),
            html_body: Some("<p>Test</p>".to_string()),
            text_body: "Test".to_string(),
        };

        assert!(client.build_message(&msg).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_recipient_is_rejected() {
        let client = EmailClient::new(config()).unwrap();

        let msg = EmailMessage {
            to: "not an address".to_string(),
            subject: "x".to_string(),
            html_body: None,
            text_body: "x".to_string(),
        };

        assert!(matches!(
            client.build_message(&msg),
            Err(AppError::Validation(_))
        ));
    }
}

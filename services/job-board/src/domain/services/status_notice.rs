//! 状态变更通知内容

use recruit_ports::Notification;

use crate::domain::entities::ApplicationStatus;

/// 发给求职者的状态变更通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusNotice {
    pub recipient_name: String,
    pub recipient_email: String,
    pub job_title: String,
    pub company_name: String,
    pub status: ApplicationStatus,
    /// 管理员附加的说明
    pub message: Option<String>,
}

impl StatusNotice {
    pub fn subject(&self) -> String {
        format!("Application Status Update - {}", self.job_title)
    }

    pub fn body(&self) -> String {
        let mut body = format!(
            "Dear {},\n\nYour application for {} at {} has been updated.\n\nStatus: {}\n\n{}\n",
            self.recipient_name,
            self.job_title,
            self.company_name,
            self.status.as_str().to_uppercase(),
            self.status.notice(),
        );

        if let Some(message) = self.message.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            body.push_str(&format!("\nAdditional Message:\n{}\n", message));
        }

        body.push_str("\nThank you for your interest in our company.\n\nBest regards,\nJob Portal Team");
        body
    }
}

impl From<StatusNotice> for Notification {
    fn from(notice: StatusNotice) -> Self {
        Notification::new(notice.recipient_email.clone(), notice.subject(), notice.body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(message: Option<&str>) -> StatusNotice {
        StatusNotice {
            recipient_name: "Jane".into(),
            recipient_email: "jane@example.com".into(),
            job_title: "Rust Engineer".into(),
            company_name: "Acme".into(),
            status: ApplicationStatus::Shortlisted,
            message: message.map(String::from),
        }
    }

    #[test]
    fn test_subject_names_job() {
        assert_eq!(
            notice(None).subject(),
            "Application Status Update - Rust Engineer"
        );
    }

    #[test]
    fn test_body_contains_status_and_canned_text() {
        let body = notice(None).body();
        assert!(body.starts_with("Dear Jane,"));
        assert!(body.contains("Rust Engineer at Acme"));
        assert!(body.contains("Status: SHORTLISTED"));
        assert!(body.contains("Congratulations! You have been shortlisted."));
        assert!(!body.contains("Additional Message"));
        assert!(body.ends_with("Job Portal Team"));
    }

    #[test]
    fn test_blank_message_is_omitted() {
        assert!(!notice(Some("  ")).body().contains("Additional Message"));
        assert!(notice(Some("See you Monday")).body().contains("Additional Message:\nSee you Monday"));
    }

    #[test]
    fn test_into_notification() {
        let notification: Notification = notice(None).into();
        assert_eq!(notification.recipient_address, "jane@example.com");
        assert!(notification.subject.contains("Rust Engineer"));
    }
}

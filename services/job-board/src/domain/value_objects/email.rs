//! Email 值对象

use email_address::EmailAddress;
use recruit_common::normalize_email;
use recruit_errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 规范化（去空白、小写）后的邮箱地址
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl AsRef<str>) -> Result<Self, EmailError> {
        let normalized = normalize_email(email.as_ref());

        if !EmailAddress::is_valid(&normalized) {
            return Err(EmailError::InvalidFormat(normalized));
        }

        Ok(Self(normalized))
    }

    /// 从存储中恢复，不再校验
    pub fn from_trusted(email: String) -> Self {
        Self(email)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Email 错误
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

impl From<EmailError> for AppError {
    fn from(_: EmailError) -> Self {
        AppError::validation("Please add a valid email")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized() {
        let email = Email::new("  Jane.Doe@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "jane.doe@example.com");
    }

    #[test]
    fn test_invalid_emails() {
        assert!(Email::new("invalid.email.com").is_err());
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("test@").is_err());
        assert!(Email::new("").is_err());
    }

    #[test]
    fn test_case_insensitive_equality() {
        assert_eq!(
            Email::new("test@example.com").unwrap(),
            Email::new("TEST@EXAMPLE.COM").unwrap()
        );
    }
}

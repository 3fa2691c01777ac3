//! Password 值对象

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use recruit_errors::AppError;
use serde::{Deserialize, Serialize};

/// 明文密码最小长度
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// 哈希后的密码（Argon2 PHC 字符串）
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// 校验长度后哈希明文密码
    pub fn from_plain(plain_password: &str) -> Result<Self, PasswordError> {
        if plain_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::TooShort);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_password.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?
            .to_string();

        Ok(Self(hash))
    }

    pub fn from_hash(hash: String) -> Self {
        Self(hash)
    }

    pub fn verify(&self, plain_password: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(&self.0).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(plain_password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HashedPassword([REDACTED])")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password must be at least 6 characters")]
    TooShort,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is invalid: {0}")]
    InvalidHash(String),
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::TooShort => AppError::validation(err.to_string()),
            other => AppError::internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = HashedPassword::from_plain("secret1").unwrap();
        assert!(hashed.verify("secret1").unwrap());
        assert!(!hashed.verify("secret2").unwrap());
    }

    #[test]
    fn test_short_password_rejected() {
        assert!(matches!(
            HashedPassword::from_plain("12345"),
            Err(PasswordError::TooShort)
        ));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let hashed = HashedPassword::from_hash("$argon2id$v=19$secret".to_string());
        assert!(!format!("{:?}", hashed).contains("secret"));
    }

    #[test]
    fn test_garbage_hash_is_error() {
        let hashed = HashedPassword::from_hash("plain".to_string());
        assert!(matches!(
            hashed.verify("plain"),
            Err(PasswordError::InvalidHash(_))
        ));
    }
}

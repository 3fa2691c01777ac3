//! recruit-auth-core - 认证核心库
//!
//! 签发与校验身份令牌。令牌只携带主体 ID、角色、签发时间和过期时间，
//! 无状态，不支持吊销。

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use recruit_errors::AppError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// 默认令牌有效期（天）
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 30;

/// 主体角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(TokenError::Invalid(format!("unknown role {}", other))),
        }
    }
}

/// JWT Claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal ID)
    pub sub: Uuid,
    pub role: Role,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

impl Claims {
    pub fn principal_id(&self) -> Uuid {
        self.sub
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// 令牌错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Token expired")]
    Expired,

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid(_) | TokenError::Expired => {
                AppError::unauthenticated("Not authorized, token failed")
            }
            TokenError::Signing(msg) => AppError::internal(msg),
        }
    }
}

/// Token 服务
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// 使用默认 30 天有效期
    pub fn with_default_ttl(secret: &str) -> Self {
        Self::new(secret, Duration::days(DEFAULT_TOKEN_TTL_DAYS))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// 签发令牌
    pub fn issue(&self, principal_id: Uuid, role: Role) -> Result<String, TokenError> {
        self.issue_at(principal_id, role, Utc::now())
    }

    /// 以指定时间签发令牌
    pub fn issue_at(
        &self,
        principal_id: Uuid,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: principal_id,
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// 校验令牌
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// 以指定时间校验令牌，`now >= exp` 即视为过期
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // 过期由下方基于注入时钟的比较负责
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?
            .claims;

        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test_secret", Duration::days(30))
    }

    fn fixed_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let service = service();
        let id = Uuid::now_v7();
        let token = service.issue(id, Role::Admin).unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.principal_id(), id);
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn test_valid_until_just_before_exp() {
        let service = service();
        let now = fixed_now();
        let token = service.issue_at(Uuid::now_v7(), Role::User, now).unwrap();

        let last_valid = now + Duration::days(30) - Duration::seconds(1);
        assert!(service.verify_at(&token, last_valid).is_ok());
    }

    #[test]
    fn test_expired_at_exp() {
        let service = service();
        let now = fixed_now();
        let token = service.issue_at(Uuid::now_v7(), Role::User, now).unwrap();

        let at_exp = now + Duration::days(30);
        assert_eq!(service.verify_at(&token, at_exp), Err(TokenError::Expired));
        assert_eq!(
            service.verify_at(&token, at_exp + Duration::days(1)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = TokenService::new("other", Duration::days(1))
            .issue(Uuid::now_v7(), Role::User)
            .unwrap();

        assert!(matches!(service().verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_malformed_token_is_invalid() {
        assert!(matches!(
            service().verify("not.a.token"),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_unknown_role_is_invalid() {
        #[derive(Serialize)]
        struct Forged {
            sub: Uuid,
            role: &'static str,
            iat: i64,
            exp: i64,
        }

        let now = Utc::now().timestamp();
        let forged = Forged {
            sub: Uuid::now_v7(),
            role: "superuser",
            iat: now,
            exp: now + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &forged,
            &EncodingKey::from_secret(b"test_secret"),
        )
        .unwrap();

        assert!(matches!(service().verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_token_errors_become_unauthenticated() {
        assert!(matches!(
            AppError::from(TokenError::Expired),
            AppError::Unauthenticated(_)
        ));
        assert!(matches!(
            AppError::from(TokenError::Signing("x".into())),
            AppError::Internal(_)
        ));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("Admin".parse::<Role>().is_err());
    }
}

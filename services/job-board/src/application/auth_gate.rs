//! 认证闸门
//!
//! 同一套算法按主体类型实例化两次（求职者、管理员）：
//! 提取 Bearer 令牌 -> 校验签名与过期 -> 角色必须匹配 -> 按 ID 加载账户 -> 账户必须启用。
//! 任何一步失败都返回 Unauthenticated，客户端看不到具体是哪一步。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use recruit_auth_core::TokenService;
use recruit_errors::{AppError, AppResult};
use tracing::warn;

use crate::domain::entities::{Account, PrincipalId};
use crate::domain::repositories::IdentityStore;

pub const NO_TOKEN_MESSAGE: &str = "Not authorized, no token";
pub const TOKEN_FAILED_MESSAGE: &str = "Not authorized, token failed";

/// 从 Authorization 头取出 Bearer 令牌
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

pub struct AuthGate<Id: PrincipalId> {
    tokens: Arc<TokenService>,
    store: Arc<dyn IdentityStore<Id>>,
}

impl<Id: PrincipalId> Clone for AuthGate<Id> {
    fn clone(&self) -> Self {
        Self {
            tokens: self.tokens.clone(),
            store: self.store.clone(),
        }
    }
}

impl<Id: PrincipalId> AuthGate<Id> {
    pub fn new(tokens: Arc<TokenService>, store: Arc<dyn IdentityStore<Id>>) -> Self {
        Self { tokens, store }
    }

    /// 校验 Authorization 头并返回启用中的账户
    pub async fn authenticate(&self, authorization: Option<&str>) -> AppResult<Account<Id>> {
        self.authenticate_at(authorization, Utc::now()).await
    }

    pub async fn authenticate_at(
        &self,
        authorization: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<Account<Id>> {
        let Some(token) = authorization.and_then(bearer_token) else {
            return Err(self.reject("missing bearer token", NO_TOKEN_MESSAGE));
        };

        let claims = match self.tokens.verify_at(token, now) {
            Ok(claims) => claims,
            Err(e) => return Err(self.reject(&e.to_string(), TOKEN_FAILED_MESSAGE)),
        };

        if claims.role != Id::ROLE {
            return Err(self.reject("role mismatch", TOKEN_FAILED_MESSAGE));
        }

        let id = Id::from_uuid(claims.principal_id());
        match self.store.find_by_id(id).await? {
            Some(account) if account.active => Ok(account),
            Some(_) => Err(self.reject("account deactivated", TOKEN_FAILED_MESSAGE)),
            None => Err(self.reject("account not found", TOKEN_FAILED_MESSAGE)),
        }
    }

    fn reject(&self, reason: &str, message: &str) -> AppError {
        let gate = Id::ROLE.as_str();
        warn!(gate, reason, "Authentication rejected");
        recruit_telemetry::record_auth_rejection(gate);
        AppError::unauthenticated(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UserAccount;
    use crate::domain::value_objects::{Email, HashedPassword};
    use crate::infrastructure::persistence::InMemoryIdentityStore;
    use chrono::Duration;
    use recruit_auth_core::Role;
    use recruit_common::{AdminId, UserId};

    fn tokens() -> Arc<TokenService> {
        Arc::new(TokenService::new("gate-secret", Duration::days(30)))
    }

    async fn gate_with_user(active: bool) -> (AuthGate<UserId>, UserAccount) {
        let store = Arc::new(InMemoryIdentityStore::<UserId>::new());
        let mut account: UserAccount = Account::register(
            "Jane".into(),
            Email::new("jane@example.com").unwrap(),
            HashedPassword::from_hash("hash".into()),
        );
        if !active {
            account.deactivate();
        }
        store.create(&account).await.unwrap();
        (AuthGate::new(tokens(), store), account)
    }

    fn assert_unauthenticated(result: AppResult<UserAccount>, expected: &str) {
        match result {
            Err(AppError::Unauthenticated(message)) => assert_eq!(message, expected),
            other => panic!("expected Unauthenticated, got {:?}", other.map(|a| a.id)),
        }
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer  abc "), Some("abc"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("abc"), None);
    }

    #[tokio::test]
    async fn test_valid_token_resolves_account() {
        let (gate, account) = gate_with_user(true).await;
        let token = tokens().issue(account.id.0, Role::User).unwrap();

        let resolved = gate
            .authenticate(Some(&format!("Bearer {}", token)))
            .await
            .unwrap();
        assert_eq!(resolved.id, account.id);
    }

    #[tokio::test]
    async fn test_missing_header_rejected() {
        let (gate, _) = gate_with_user(true).await;
        assert_unauthenticated(gate.authenticate(None).await, NO_TOKEN_MESSAGE);
    }

    #[tokio::test]
    async fn test_expired_token_rejected() {
        let (gate, account) = gate_with_user(true).await;
        let issued = Utc::now() - Duration::days(31);
        let token = tokens().issue_at(account.id.0, Role::User, issued).unwrap();

        let result = gate
            .authenticate_at(Some(&format!("Bearer {}", token)), Utc::now())
            .await;
        assert_unauthenticated(result, TOKEN_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_admin_token_rejected_by_user_gate() {
        let (gate, account) = gate_with_user(true).await;
        let token = tokens().issue(account.id.0, Role::Admin).unwrap();

        let result = gate.authenticate(Some(&format!("Bearer {}", token))).await;
        assert_unauthenticated(result, TOKEN_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_deactivated_and_unknown_share_message() {
        let (gate, account) = gate_with_user(false).await;
        let token = tokens().issue(account.id.0, Role::User).unwrap();
        let deactivated = gate.authenticate(Some(&format!("Bearer {}", token))).await;

        let stranger = tokens().issue(UserId::new().0, Role::User).unwrap();
        let unknown = gate.authenticate(Some(&format!("Bearer {}", stranger))).await;

        assert_unauthenticated(deactivated, TOKEN_FAILED_MESSAGE);
        assert_unauthenticated(unknown, TOKEN_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_admin_gate_accepts_admin_tokens() {
        let store = Arc::new(InMemoryIdentityStore::<AdminId>::new());
        let admin = Account::<AdminId>::register(
            "Boss".into(),
            Email::new("boss@example.com").unwrap(),
            HashedPassword::from_hash("hash".into()),
        );
        store.create(&admin).await.unwrap();
        let gate = AuthGate::new(tokens(), store);

        let token = tokens().issue(admin.id.0, Role::Admin).unwrap();
        let resolved = gate.authenticate(Some(&format!("Bearer {}", token))).await.unwrap();
        assert_eq!(resolved.id, admin.id);
    }
}

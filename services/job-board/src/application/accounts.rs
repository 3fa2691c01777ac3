//! 账户服务：注册、登录、资料、头像
//!
//! 求职者与管理员共用同一实现，由 ID 类型选择存储与令牌角色。

use std::sync::Arc;

use recruit_auth_core::TokenService;
use recruit_errors::{AppError, AppResult};
use recruit_ports::{FileCategory, FileStore};
use serde::Deserialize;
use tracing::info;

use crate::application::views::{AccountProfile, AuthPayload};
use crate::domain::entities::{Account, PrincipalId};
use crate::domain::repositories::{IdentityStore, duplicate_account_message};
use crate::domain::value_objects::{Email, HashedPassword};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// 注册请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterCommand {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// 登录请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginCommand {
    pub email: Option<String>,
    pub password: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub struct AccountService<Id: PrincipalId> {
    store: Arc<dyn IdentityStore<Id>>,
    tokens: Arc<TokenService>,
    files: Arc<dyn FileStore>,
}

impl<Id: PrincipalId> AccountService<Id> {
    pub fn new(
        store: Arc<dyn IdentityStore<Id>>,
        tokens: Arc<TokenService>,
        files: Arc<dyn FileStore>,
    ) -> Self {
        Self {
            store,
            tokens,
            files,
        }
    }

    pub async fn register(&self, command: RegisterCommand) -> AppResult<AuthPayload> {
        let (Some(name), Some(email), Some(password)) = (
            present(command.name),
            present(command.email),
            present(command.password),
        ) else {
            return Err(AppError::validation("Please provide all required fields"));
        };

        let password_hash = HashedPassword::from_plain(&password)?;
        let email = Email::new(&email)?;

        if self.store.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(duplicate_account_message::<Id>()));
        }

        let account = Account::<Id>::register(name.trim().to_string(), email, password_hash);
        self.store.create(&account).await?;

        info!(role = %Id::ROLE, id = %account.id, "Account registered");
        self.auth_payload(&account)
    }

    /// 未知邮箱与错误密码返回同一消息；密码通过后才检查停用状态
    pub async fn login(&self, command: LoginCommand) -> AppResult<AuthPayload> {
        let (Some(email), Some(password)) = (present(command.email), present(command.password))
        else {
            return Err(AppError::validation("Please provide email and password"));
        };

        let email = Email::new(&email).map_err(|_| AppError::unauthenticated(INVALID_CREDENTIALS))?;
        let account = self
            .store
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::unauthenticated(INVALID_CREDENTIALS))?;

        if !account.password_hash.verify(&password)? {
            return Err(AppError::unauthenticated(INVALID_CREDENTIALS));
        }

        if !account.active {
            return Err(AppError::unauthenticated("Account is deactivated"));
        }

        info!(role = %Id::ROLE, id = %account.id, "Login succeeded");
        self.auth_payload(&account)
    }

    pub async fn profile(&self, id: Id) -> AppResult<AccountProfile> {
        let account = self.load(id).await?;
        Ok(AccountProfile::from(&account))
    }

    /// 直接保存头像引用
    pub async fn update_profile_pic(&self, id: Id, reference: Option<String>) -> AppResult<AccountProfile> {
        let Some(reference) = present(reference) else {
            return Err(AppError::validation("Please provide profile picture URL"));
        };

        let mut account = self.load(id).await?;
        account.set_profile_pic(reference.trim().to_string());
        self.store.save(&account).await?;

        Ok(AccountProfile::from(&account))
    }

    /// 上传头像文件后保存其引用
    pub async fn upload_profile_pic(
        &self,
        id: Id,
        original_name: &str,
        bytes: &[u8],
    ) -> AppResult<AccountProfile> {
        let mut account = self.load(id).await?;
        let reference = self
            .files
            .store(FileCategory::ProfilePic, original_name, bytes)
            .await?;

        account.set_profile_pic(reference);
        self.store.save(&account).await?;

        Ok(AccountProfile::from(&account))
    }

    async fn load(&self, id: Id) -> AppResult<Account<Id>> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} not found", Id::LABEL)))
    }

    fn auth_payload(&self, account: &Account<Id>) -> AppResult<AuthPayload> {
        let token = self.tokens.issue(account.id.uuid(), Id::ROLE)?;
        Ok(AuthPayload {
            profile: AccountProfile::from(account),
            token,
        })
    }
}

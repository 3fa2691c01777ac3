//! 身份存储 trait

use async_trait::async_trait;
use recruit_errors::AppResult;

use crate::domain::entities::{Account, PrincipalId};
use crate::domain::value_objects::Email;

/// 每类主体一个实例，邮箱在同类内唯一
#[async_trait]
pub trait IdentityStore<Id: PrincipalId>: Send + Sync {
    async fn find_by_id(&self, id: Id) -> AppResult<Option<Account<Id>>>;

    async fn find_by_email(&self, email: &Email) -> AppResult<Option<Account<Id>>>;

    /// 新建账户；邮箱已存在时返回 Conflict
    async fn create(&self, account: &Account<Id>) -> AppResult<()>;

    /// 更新可变字段（姓名、启用状态、头像）
    async fn save(&self, account: &Account<Id>) -> AppResult<()>;
}

/// 账户已存在时的统一消息
pub fn duplicate_account_message<Id: PrincipalId>() -> String {
    format!("{} already exists with this email", Id::LABEL)
}

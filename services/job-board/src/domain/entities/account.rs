//! 身份账户
//!
//! 求职者与招聘管理员是两类独立的主体：各自的存储、各自的邮箱命名空间、
//! 各自的令牌角色。两者共用同一个账户结构，由 ID 类型区分。

use std::fmt::{Debug, Display};
use std::hash::Hash;

use recruit_auth_core::Role;
use recruit_common::{AdminId, Timestamps, UserId};
use uuid::Uuid;

use crate::domain::value_objects::{Email, HashedPassword};

/// 主体 ID：决定账户种类、令牌角色和对外名称
pub trait PrincipalId:
    Copy + Eq + Hash + Debug + Display + Send + Sync + 'static
{
    const ROLE: Role;
    /// 面向客户端消息中的名称
    const LABEL: &'static str;

    fn from_uuid(uuid: Uuid) -> Self;
    fn uuid(&self) -> Uuid;
    fn principal(self) -> AuthenticatedPrincipal;
}

impl PrincipalId for UserId {
    const ROLE: Role = Role::User;
    const LABEL: &'static str = "User";

    fn from_uuid(uuid: Uuid) -> Self {
        UserId(uuid)
    }

    fn uuid(&self) -> Uuid {
        self.0
    }

    fn principal(self) -> AuthenticatedPrincipal {
        AuthenticatedPrincipal::User(self)
    }
}

impl PrincipalId for AdminId {
    const ROLE: Role = Role::Admin;
    const LABEL: &'static str = "Admin";

    fn from_uuid(uuid: Uuid) -> Self {
        AdminId(uuid)
    }

    fn uuid(&self) -> Uuid {
        self.0
    }

    fn principal(self) -> AuthenticatedPrincipal {
        AuthenticatedPrincipal::Admin(self)
    }
}

/// 已通过认证的主体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthenticatedPrincipal {
    User(UserId),
    Admin(AdminId),
}

impl AuthenticatedPrincipal {
    pub fn id(&self) -> Uuid {
        match self {
            Self::User(id) => id.0,
            Self::Admin(id) => id.0,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::User(_) => Role::User,
            Self::Admin(_) => Role::Admin,
        }
    }
}

/// 账户
#[derive(Debug, Clone)]
pub struct Account<Id: PrincipalId> {
    pub id: Id,
    pub name: String,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub active: bool,
    pub profile_pic: Option<String>,
    pub timestamps: Timestamps,
}

pub type UserAccount = Account<UserId>;
pub type AdminAccount = Account<AdminId>;

impl<Id: PrincipalId> Account<Id> {
    /// 注册新账户，默认启用
    pub fn register(name: String, email: Email, password_hash: HashedPassword) -> Self {
        Self {
            id: Id::from_uuid(Uuid::now_v7()),
            name,
            email,
            password_hash,
            active: true,
            profile_pic: None,
            timestamps: Timestamps::new(),
        }
    }

    pub fn role(&self) -> Role {
        Id::ROLE
    }

    pub fn principal(&self) -> AuthenticatedPrincipal {
        self.id.principal()
    }

    pub fn set_profile_pic(&mut self, reference: String) {
        self.profile_pic = Some(reference);
        self.timestamps.touch();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.timestamps.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account<Id: PrincipalId>() -> Account<Id> {
        Account::register(
            "Jane".to_string(),
            Email::new("jane@example.com").unwrap(),
            HashedPassword::from_hash("hash".to_string()),
        )
    }

    #[test]
    fn test_role_follows_id_type() {
        let user: UserAccount = account();
        let admin: AdminAccount = account();

        assert_eq!(user.role(), Role::User);
        assert_eq!(admin.role(), Role::Admin);
        assert!(matches!(admin.principal(), AuthenticatedPrincipal::Admin(id) if id == admin.id));
    }

    #[test]
    fn test_new_accounts_are_active() {
        let mut user: UserAccount = account();
        assert!(user.active);

        user.deactivate();
        assert!(!user.active);
    }
}

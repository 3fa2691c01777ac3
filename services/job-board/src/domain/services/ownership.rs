//! 所有权校验
//!
//! 只有职位的发布者可以查看或修改该职位下的投递。判定只看主体 ID，
//! 不看角色以外的任何属性。

use recruit_common::AdminId;
use recruit_errors::{AppError, AppResult};

use crate::domain::entities::{Application, AuthenticatedPrincipal, Job};

/// 有发布者的资源
pub trait OwnedResource {
    fn owner_id(&self) -> AdminId;
}

impl OwnedResource for Job {
    fn owner_id(&self) -> AdminId {
        self.owner_id
    }
}

/// 投递及其所属职位；所有者来自职位
pub struct ApplicationOnJob<'a> {
    pub application: &'a Application,
    pub job: &'a Job,
}

impl OwnedResource for ApplicationOnJob<'_> {
    fn owner_id(&self) -> AdminId {
        self.job.owner_id
    }
}

pub fn owns_resource(principal: &AuthenticatedPrincipal, resource: &impl OwnedResource) -> bool {
    match principal {
        AuthenticatedPrincipal::Admin(id) => *id == resource.owner_id(),
        AuthenticatedPrincipal::User(_) => false,
    }
}

/// 非所有者返回 Forbidden
pub fn ensure_owns(
    principal: &AuthenticatedPrincipal,
    resource: &impl OwnedResource,
    denial: &str,
) -> AppResult<()> {
    if owns_resource(principal, resource) {
        Ok(())
    } else {
        Err(AppError::forbidden(denial))
    }
}

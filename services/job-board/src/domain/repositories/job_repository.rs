//! 职位 Repository trait

use async_trait::async_trait;
use recruit_common::{AdminId, JobId};
use recruit_errors::AppResult;

use crate::domain::entities::Job;

/// 职位查询条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub owner_id: Option<AdminId>,
    pub active_only: bool,
}

impl JobFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn owned_by(owner_id: AdminId) -> Self {
        Self {
            owner_id: Some(owner_id),
            active_only: false,
        }
    }

    pub fn open() -> Self {
        Self {
            owner_id: None,
            active_only: true,
        }
    }

    pub fn matches(&self, job: &Job) -> bool {
        self.owner_id.is_none_or(|owner| owner == job.owner_id) && (!self.active_only || job.is_active)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn find_by_id(&self, id: JobId) -> AppResult<Option<Job>>;

    /// 按创建时间倒序返回
    async fn find(&self, filter: &JobFilter) -> AppResult<Vec<Job>>;

    async fn create(&self, job: &Job) -> AppResult<()>;

    async fn save(&self, job: &Job) -> AppResult<()>;
}

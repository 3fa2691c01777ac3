//! 投递 Repository trait

use async_trait::async_trait;
use recruit_common::{ApplicationId, JobId, UserId};
use recruit_errors::AppResult;

use crate::domain::entities::Application;

pub const DUPLICATE_APPLICATION_MESSAGE: &str = "You have already applied for this job";

/// 投递查询条件，各条件取交集
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    /// 属于其中任一职位
    pub job_ids: Option<Vec<JobId>>,
    pub user_id: Option<UserId>,
}

impl ApplicationFilter {
    pub fn for_job(job_id: JobId) -> Self {
        Self::for_jobs(vec![job_id])
    }

    pub fn for_jobs(job_ids: Vec<JobId>) -> Self {
        Self {
            job_ids: Some(job_ids),
            user_id: None,
        }
    }

    pub fn for_user(user_id: UserId) -> Self {
        Self {
            job_ids: None,
            user_id: Some(user_id),
        }
    }

    pub fn for_submission(job_id: JobId, user_id: UserId) -> Self {
        Self {
            job_ids: Some(vec![job_id]),
            user_id: Some(user_id),
        }
    }

    pub fn matches(&self, application: &Application) -> bool {
        self.job_ids
            .as_ref()
            .is_none_or(|ids| ids.contains(&application.job_id))
            && self.user_id.is_none_or(|id| id == application.user_id)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn find_by_id(&self, id: ApplicationId) -> AppResult<Option<Application>>;

    /// 按创建时间倒序返回
    async fn find(&self, filter: &ApplicationFilter) -> AppResult<Vec<Application>>;

    /// 原子插入；(job_id, user_id) 已存在时返回 Conflict
    async fn create(&self, application: &Application) -> AppResult<()>;

    /// 覆盖状态与更新时间
    async fn save(&self, application: &Application) -> AppResult<()>;
}

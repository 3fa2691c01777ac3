//! 视图组装：为职位补发布者、为投递补求职者与职位摘要

use std::collections::HashMap;
use std::sync::Arc;

use recruit_common::{AdminId, JobId, UserId};
use recruit_errors::AppResult;
use tracing::warn;

use crate::application::views::{ApplicationView, JobSummary, JobView, PersonSummary};
use crate::domain::entities::{Application, Job};
use crate::domain::repositories::{IdentityStore, JobRepository};

#[derive(Clone)]
pub struct ViewAssembler {
    users: Arc<dyn IdentityStore<UserId>>,
    admins: Arc<dyn IdentityStore<AdminId>>,
    jobs: Arc<dyn JobRepository>,
}

impl ViewAssembler {
    pub fn new(
        users: Arc<dyn IdentityStore<UserId>>,
        admins: Arc<dyn IdentityStore<AdminId>>,
        jobs: Arc<dyn JobRepository>,
    ) -> Self {
        Self { users, admins, jobs }
    }

    pub async fn user(&self, id: UserId) -> AppResult<Option<PersonSummary>> {
        Ok(self.users.find_by_id(id).await?.as_ref().map(PersonSummary::from))
    }

    pub async fn admin(&self, id: AdminId) -> AppResult<Option<PersonSummary>> {
        Ok(self.admins.find_by_id(id).await?.as_ref().map(PersonSummary::from))
    }

    pub async fn job_view(&self, job: &Job) -> AppResult<JobView> {
        Ok(JobView::new(job, self.admin(job.owner_id).await?))
    }

    /// 保持输入顺序，同一发布者只查询一次
    pub async fn job_views(&self, jobs: &[Job]) -> AppResult<Vec<JobView>> {
        let mut posters: HashMap<AdminId, Option<PersonSummary>> = HashMap::new();
        let mut views = Vec::with_capacity(jobs.len());

        for job in jobs {
            if !posters.contains_key(&job.owner_id) {
                posters.insert(job.owner_id, self.admin(job.owner_id).await?);
            }
            let poster = posters.get(&job.owner_id).cloned().flatten();
            views.push(JobView::new(job, poster));
        }

        Ok(views)
    }

    /// 写入已提交后的响应视图，求职者查询失败时省略摘要
    pub async fn committed_application_view(
        &self,
        application: &Application,
        job: &Job,
    ) -> ApplicationView {
        let user = match self.user(application.user_id).await {
            Ok(user) => user,
            Err(e) => {
                warn!(
                    application_id = %application.id,
                    user_id = %application.user_id,
                    error = %e,
                    "Failed to load applicant summary"
                );
                None
            }
        };
        ApplicationView::new(application, Some(JobSummary::from(job)), user)
    }

    /// 保持输入顺序，职位与求职者各只查询一次
    pub async fn application_views(
        &self,
        applications: &[Application],
    ) -> AppResult<Vec<ApplicationView>> {
        let mut jobs: HashMap<JobId, Option<JobSummary>> = HashMap::new();
        let mut users: HashMap<UserId, Option<PersonSummary>> = HashMap::new();
        let mut views = Vec::with_capacity(applications.len());

        for application in applications {
            if !jobs.contains_key(&application.job_id) {
                let summary = self
                    .jobs
                    .find_by_id(application.job_id)
                    .await?
                    .as_ref()
                    .map(JobSummary::from);
                jobs.insert(application.job_id, summary);
            }
            if !users.contains_key(&application.user_id) {
                users.insert(application.user_id, self.user(application.user_id).await?);
            }

            views.push(ApplicationView::new(
                application,
                jobs.get(&application.job_id).cloned().flatten(),
                users.get(&application.user_id).cloned().flatten(),
            ));
        }

        Ok(views)
    }
}

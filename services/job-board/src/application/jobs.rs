//! 职位服务

use std::sync::Arc;

use recruit_common::{AdminId, JobId};
use recruit_errors::{AppError, AppResult};
use recruit_ports::{FileCategory, FileStore};
use tracing::info;

use crate::application::FileUpload;
use crate::application::assembler::ViewAssembler;
use crate::application::views::{ApplicationView, JobView};
use crate::domain::entities::{AuthenticatedPrincipal, Job, JobDraft};
use crate::domain::repositories::{ApplicationFilter, ApplicationRepository, JobFilter, JobRepository};
use crate::domain::services::ensure_owns;

pub const JOB_NOT_FOUND: &str = "Job not found";

pub struct JobService {
    jobs: Arc<dyn JobRepository>,
    applications: Arc<dyn ApplicationRepository>,
    files: Arc<dyn FileStore>,
    views: ViewAssembler,
}

impl JobService {
    pub fn new(
        jobs: Arc<dyn JobRepository>,
        applications: Arc<dyn ApplicationRepository>,
        files: Arc<dyn FileStore>,
        views: ViewAssembler,
    ) -> Self {
        Self {
            jobs,
            applications,
            files,
            views,
        }
    }

    /// 先校验字段，再保存公司 Logo
    pub async fn create(
        &self,
        owner: AdminId,
        draft: JobDraft,
        logo: Option<FileUpload>,
    ) -> AppResult<JobView> {
        let details = draft.validate()?;

        let company_logo = match logo {
            Some(upload) => Some(
                self.files
                    .store(FileCategory::CompanyLogo, &upload.original_name, &upload.bytes)
                    .await?,
            ),
            None => None,
        };

        let job = Job::post(owner, details, company_logo);
        self.jobs.create(&job).await?;

        info!(job_id = %job.id, owner_id = %owner, "Job created");
        self.views.job_view(&job).await
    }

    pub async fn list_all(&self) -> AppResult<Vec<JobView>> {
        let jobs = self.jobs.find(&JobFilter::all()).await?;
        self.views.job_views(&jobs).await
    }

    pub async fn list_mine(&self, owner: AdminId) -> AppResult<Vec<JobView>> {
        let jobs = self.jobs.find(&JobFilter::owned_by(owner)).await?;
        self.views.job_views(&jobs).await
    }

    pub async fn list_open(&self) -> AppResult<Vec<JobView>> {
        let jobs = self.jobs.find(&JobFilter::open()).await?;
        self.views.job_views(&jobs).await
    }

    /// 公开查询单个职位；已关闭的职位不再展示
    pub async fn get_open(&self, id: JobId) -> AppResult<JobView> {
        let job = self.load(id).await?;
        if !job.is_active {
            return Err(AppError::invalid_state("Job is no longer active"));
        }
        self.views.job_view(&job).await
    }

    pub async fn applications_for_job(
        &self,
        actor: AdminId,
        id: JobId,
    ) -> AppResult<Vec<ApplicationView>> {
        let job = self.load(id).await?;
        ensure_owns(
            &AuthenticatedPrincipal::Admin(actor),
            &job,
            "Not authorized to view these applications",
        )?;

        let applications = self.applications.find(&ApplicationFilter::for_job(id)).await?;
        self.views.application_views(&applications).await
    }

    /// 开放或关闭职位，仅发布者可操作
    pub async fn set_active(&self, actor: AdminId, id: JobId, active: bool) -> AppResult<JobView> {
        let mut job = self.load(id).await?;
        ensure_owns(
            &AuthenticatedPrincipal::Admin(actor),
            &job,
            "Not authorized to update this job",
        )?;

        job.set_active(active);
        self.jobs.save(&job).await?;

        info!(job_id = %id, active, "Job status changed");
        self.views.job_view(&job).await
    }

    async fn load(&self, id: JobId) -> AppResult<Job> {
        self.jobs
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(JOB_NOT_FOUND))
    }
}

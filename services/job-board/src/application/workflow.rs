//! 投递工作流
//!
//! 提交：职位存在且开放，(职位, 求职者) 唯一由存储层原子保证。
//! 状态变更：加载 -> 所有权校验 -> 状态校验 -> 持久化 -> 独立任务发送通知。
//! 持久化成功即视为变更成功，通知结果只记录日志。

use std::sync::Arc;

use recruit_common::{AdminId, ApplicationId, JobId, UserId};
use recruit_errors::{AppError, AppResult};
use recruit_ports::{FileCategory, FileStore, Notification, NotificationSink};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::application::FileUpload;
use crate::application::assembler::ViewAssembler;
use crate::application::views::ApplicationView;
use crate::application::jobs::JOB_NOT_FOUND;
use crate::domain::entities::{
    Application, ApplicationStatus, AuthenticatedPrincipal, Job, Resume,
};
use crate::domain::repositories::{
    ApplicationFilter, ApplicationRepository, DUPLICATE_APPLICATION_MESSAGE, IdentityStore,
    JobFilter, JobRepository,
};
use crate::domain::services::{ApplicationOnJob, StatusNotice, ensure_owns};

pub const APPLICATION_NOT_FOUND: &str = "Application not found";

/// 通知发送结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Failed(String),
    /// 求职者不存在或无法加载，未尝试发送
    Skipped,
}

impl DeliveryOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryOutcome::Delivered => "delivered",
            DeliveryOutcome::Failed(_) => "failed",
            DeliveryOutcome::Skipped => "skipped",
        }
    }
}

/// 状态变更结果
///
/// `notification` 为后台发送任务；调用方可以丢弃它，任务照常运行。
pub struct TransitionOutcome {
    pub application: ApplicationView,
    pub notification: JoinHandle<DeliveryOutcome>,
}

pub struct ApplicationWorkflow {
    jobs: Arc<dyn JobRepository>,
    applications: Arc<dyn ApplicationRepository>,
    users: Arc<dyn IdentityStore<UserId>>,
    files: Arc<dyn FileStore>,
    sink: Arc<dyn NotificationSink>,
    views: ViewAssembler,
}

impl ApplicationWorkflow {
    pub fn new(
        jobs: Arc<dyn JobRepository>,
        applications: Arc<dyn ApplicationRepository>,
        users: Arc<dyn IdentityStore<UserId>>,
        files: Arc<dyn FileStore>,
        sink: Arc<dyn NotificationSink>,
        views: ViewAssembler,
    ) -> Self {
        Self {
            jobs,
            applications,
            users,
            files,
            sink,
            views,
        }
    }

    /// 提交投递
    pub async fn submit(
        &self,
        user_id: UserId,
        job_id: JobId,
        resume: Option<FileUpload>,
        cover_letter: Option<String>,
    ) -> AppResult<ApplicationView> {
        let Some(resume) = resume else {
            return Err(AppError::validation("Please upload your resume"));
        };

        let job = self.load_job(job_id).await?;
        job.ensure_accepting_applications()?;

        // 快速拒绝明显的重复提交，避免保存无用的简历文件；唯一性仍以 create 为准
        let existing = self
            .applications
            .find(&ApplicationFilter::for_submission(job_id, user_id))
            .await?;
        if !existing.is_empty() {
            return Err(AppError::conflict(DUPLICATE_APPLICATION_MESSAGE));
        }

        let reference = self
            .files
            .store(FileCategory::Resume, &resume.original_name, &resume.bytes)
            .await?;
        let resume = Resume {
            reference: reference.clone(),
            original_name: resume.original_name,
        };

        let created = async {
            let application = Application::submit(&job, user_id, resume, cover_letter)?;
            self.applications.create(&application).await?;
            Ok::<_, AppError>(application)
        }
        .await;
        let application = match created {
            Ok(application) => application,
            Err(e) => {
                self.discard_resume(&reference).await;
                return Err(e);
            }
        };

        recruit_telemetry::record_submission();
        info!(
            application_id = %application.id,
            job_id = %job_id,
            user_id = %user_id,
            "Application submitted"
        );

        Ok(self.views.committed_application_view(&application, &job).await)
    }

    /// 变更状态并通知求职者
    pub async fn transition(
        &self,
        id: ApplicationId,
        actor: AdminId,
        status: &str,
        message: Option<String>,
    ) -> AppResult<TransitionOutcome> {
        let (application, job) = self.apply_transition(id, actor, status).await?;
        let notification = self.dispatch_notification(&application, &job, message);
        let application = self.views.committed_application_view(&application, &job).await;

        Ok(TransitionOutcome {
            application,
            notification,
        })
    }

    /// 变更状态，不发送通知
    pub async fn transition_silently(
        &self,
        id: ApplicationId,
        actor: AdminId,
        status: &str,
    ) -> AppResult<ApplicationView> {
        let (application, job) = self.apply_transition(id, actor, status).await?;
        Ok(self.views.committed_application_view(&application, &job).await)
    }

    pub async fn my_applications(&self, user_id: UserId) -> AppResult<Vec<ApplicationView>> {
        let applications = self
            .applications
            .find(&ApplicationFilter::for_user(user_id))
            .await?;
        self.views.application_views(&applications).await
    }

    /// 管理员名下所有职位的投递
    pub async fn admin_applications(&self, admin: AdminId) -> AppResult<Vec<ApplicationView>> {
        let job_ids: Vec<JobId> = self
            .jobs
            .find(&JobFilter::owned_by(admin))
            .await?
            .into_iter()
            .map(|job| job.id)
            .collect();
        if job_ids.is_empty() {
            return Ok(Vec::new());
        }

        let applications = self
            .applications
            .find(&ApplicationFilter::for_jobs(job_ids))
            .await?;
        self.views.application_views(&applications).await
    }

    async fn apply_transition(
        &self,
        id: ApplicationId,
        actor: AdminId,
        status: &str,
    ) -> AppResult<(Application, Job)> {
        let mut application = self
            .applications
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(APPLICATION_NOT_FOUND))?;
        let job = self.load_job(application.job_id).await?;

        ensure_owns(
            &AuthenticatedPrincipal::Admin(actor),
            &ApplicationOnJob {
                application: &application,
                job: &job,
            },
            "Not authorized to update this application",
        )?;

        let status: ApplicationStatus = status.parse()?;
        let previous = application.status;
        application.set_status(status);
        self.applications.save(&application).await?;

        recruit_telemetry::record_transition(status.as_str());
        info!(
            application_id = %id,
            from = %previous,
            to = %status,
            "Application status updated"
        );

        Ok((application, job))
    }

    /// 在独立任务中加载求职者并发送一次通知
    fn dispatch_notification(
        &self,
        application: &Application,
        job: &Job,
        message: Option<String>,
    ) -> JoinHandle<DeliveryOutcome> {
        let users = self.users.clone();
        let sink = self.sink.clone();
        let application_id = application.id;
        let user_id = application.user_id;
        let status = application.status;
        let job_title = job.details.job_title.clone();
        let company_name = job.details.company_name.clone();

        tokio::spawn(async move {
            let user = match users.find_by_id(user_id).await {
                Ok(Some(user)) => user,
                Ok(None) => {
                    warn!(
                        application_id = %application_id,
                        user_id = %user_id,
                        "Applicant not found, notification skipped"
                    );
                    recruit_telemetry::record_notification(DeliveryOutcome::Skipped.as_str());
                    return DeliveryOutcome::Skipped;
                }
                Err(e) => {
                    error!(
                        application_id = %application_id,
                        user_id = %user_id,
                        error = %e,
                        "Failed to load applicant, notification skipped"
                    );
                    recruit_telemetry::record_notification(DeliveryOutcome::Skipped.as_str());
                    return DeliveryOutcome::Skipped;
                }
            };

            let notification: Notification = StatusNotice {
                recipient_name: user.name,
                recipient_email: user.email.as_str().to_string(),
                job_title,
                company_name,
                status,
                message,
            }
            .into();

            let outcome = match sink.send(&notification).await {
                Ok(()) => {
                    info!(
                        application_id = %application_id,
                        recipient = %notification.recipient_address,
                        "Status notification delivered"
                    );
                    DeliveryOutcome::Delivered
                }
                Err(e) => {
                    error!(
                        application_id = %application_id,
                        recipient = %notification.recipient_address,
                        error = %e,
                        "Status notification failed"
                    );
                    DeliveryOutcome::Failed(e.to_string())
                }
            };
            recruit_telemetry::record_notification(outcome.as_str());
            outcome
        })
    }

    /// 投递未写入时清理已保存的简历，失败只记录日志
    async fn discard_resume(&self, reference: &str) {
        if let Err(e) = self.files.remove(reference).await {
            warn!(reference = %reference, error = %e, "Failed to remove orphaned resume");
        }
    }

    async fn load_job(&self, id: JobId) -> AppResult<Job> {
        self.jobs
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(JOB_NOT_FOUND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{JobDetails, JobType};
    use crate::domain::repositories::{MockApplicationRepository, MockJobRepository};
    use crate::infrastructure::file_store::LocalFileStore;
    use crate::infrastructure::notification::LoggingNotificationSink;
    use crate::infrastructure::persistence::InMemoryIdentityStore;

    fn job(owner: AdminId) -> Job {
        Job::post(
            owner,
            JobDetails {
                company_name: "Acme".into(),
                job_title: "Rust Engineer".into(),
                role: "Backend".into(),
                location: "Remote".into(),
                salary: "100k".into(),
                job_type: JobType::FullTime,
                experience: "3 years".into(),
                description: "Build services".into(),
                requirements: vec![],
                skills: vec![],
            },
            None,
        )
    }

    fn upload_dir() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("recruit-workflow-{}", uuid::Uuid::now_v7()))
    }

    fn workflow(jobs: MockJobRepository, applications: MockApplicationRepository) -> ApplicationWorkflow {
        workflow_in(upload_dir(), jobs, applications)
    }

    fn workflow_in(
        dir: std::path::PathBuf,
        jobs: MockJobRepository,
        applications: MockApplicationRepository,
    ) -> ApplicationWorkflow {
        let jobs: Arc<dyn JobRepository> = Arc::new(jobs);
        let users: Arc<dyn IdentityStore<UserId>> = Arc::new(InMemoryIdentityStore::<UserId>::new());
        let views = ViewAssembler::new(
            users.clone(),
            Arc::new(InMemoryIdentityStore::<AdminId>::new()),
            jobs.clone(),
        );
        ApplicationWorkflow::new(
            jobs,
            Arc::new(applications),
            users,
            Arc::new(LocalFileStore::new(dir)),
            Arc::new(LoggingNotificationSink),
            views,
        )
    }

    fn resume() -> Option<FileUpload> {
        Some(FileUpload {
            original_name: "cv.pdf".into(),
            bytes: b"%PDF".to_vec(),
        })
    }

    #[tokio::test]
    async fn test_submit_without_resume() {
        let mut jobs = MockJobRepository::new();
        jobs.expect_find_by_id().never();

        let result = workflow(jobs, MockApplicationRepository::new())
            .submit(UserId::new(), JobId::new(), None, None)
            .await;
        assert!(matches!(result, Err(AppError::Validation(m)) if m == "Please upload your resume"));
    }

    #[tokio::test]
    async fn test_submit_unknown_job() {
        let mut jobs = MockJobRepository::new();
        jobs.expect_find_by_id().returning(|_| Ok(None));

        let result = workflow(jobs, MockApplicationRepository::new())
            .submit(UserId::new(), JobId::new(), resume(), None)
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_submit_to_closed_job_creates_nothing() {
        let mut closed = job(AdminId::new());
        closed.set_active(false);
        let job_id = closed.id;

        let mut jobs = MockJobRepository::new();
        jobs.expect_find_by_id()
            .returning(move |_| Ok(Some(closed.clone())));
        let mut applications = MockApplicationRepository::new();
        applications.expect_create().never();

        let result = workflow(jobs, applications)
            .submit(UserId::new(), job_id, resume(), None)
            .await;
        assert!(matches!(result, Err(AppError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_storage_conflict_surfaces() {
        let open = job(AdminId::new());
        let job_id = open.id;

        let mut jobs = MockJobRepository::new();
        jobs.expect_find_by_id()
            .returning(move |_| Ok(Some(open.clone())));
        let mut applications = MockApplicationRepository::new();
        applications.expect_find().returning(|_| Ok(vec![]));
        applications
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict(DUPLICATE_APPLICATION_MESSAGE)));

        let dir = upload_dir();
        let result = workflow_in(dir.clone(), jobs, applications)
            .submit(UserId::new(), job_id, resume(), Some("Hello".into()))
            .await;
        assert!(matches!(result, Err(AppError::Conflict(m)) if m == DUPLICATE_APPLICATION_MESSAGE));

        // 落败的提交不留下简历文件
        let mut entries = tokio::fs::read_dir(dir.join("resumes")).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_application_is_not_found_before_status_check() {
        let mut applications = MockApplicationRepository::new();
        applications.expect_find_by_id().returning(|_| Ok(None));
        applications.expect_save().never();

        let result = workflow(MockJobRepository::new(), applications)
            .transition_silently(ApplicationId::new(), AdminId::new(), "bogus")
            .await;
        assert!(matches!(result, Err(AppError::NotFound(m)) if m == APPLICATION_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_non_owner_forbidden_even_with_invalid_status() {
        let posted = job(AdminId::new());
        let application = Application::submit(
            &posted,
            UserId::new(),
            Resume {
                reference: "/uploads/resumes/cv.pdf".into(),
                original_name: "cv.pdf".into(),
            },
            None,
        )
        .unwrap();
        let id = application.id;

        let mut jobs = MockJobRepository::new();
        jobs.expect_find_by_id()
            .returning(move |_| Ok(Some(posted.clone())));
        let mut applications = MockApplicationRepository::new();
        applications
            .expect_find_by_id()
            .returning(move |_| Ok(Some(application.clone())));
        applications.expect_save().never();

        let result = workflow(jobs, applications)
            .transition_silently(id, AdminId::new(), "bogus")
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_admin_without_jobs_sees_nothing() {
        let mut jobs = MockJobRepository::new();
        jobs.expect_find().returning(|_| Ok(vec![]));
        let mut applications = MockApplicationRepository::new();
        applications.expect_find().never();

        let views = workflow(jobs, applications)
            .admin_applications(AdminId::new())
            .await
            .unwrap();
        assert!(views.is_empty());
    }

    #[test]
    fn test_delivery_outcome_labels() {
        assert_eq!(DeliveryOutcome::Delivered.as_str(), "delivered");
        assert_eq!(DeliveryOutcome::Failed("smtp".into()).as_str(), "failed");
        assert_eq!(DeliveryOutcome::Skipped.as_str(), "skipped");
    }
}

//! 对外返回的视图
//!
//! 字段名保持 camelCase，主键统一为 `_id`。

use chrono::{DateTime, Utc};
use recruit_auth_core::Role;
use recruit_common::{AdminId, ApplicationId, JobId, UserId};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::{
    Account, Application, ApplicationStatus, Job, JobType, PrincipalId,
};

/// 账户资料
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl<Id: PrincipalId> From<&Account<Id>> for AccountProfile {
    fn from(account: &Account<Id>) -> Self {
        Self {
            id: account.id.uuid(),
            name: account.name.clone(),
            email: account.email.as_str().to_string(),
            role: account.role(),
            is_active: account.active,
            profile_pic: account.profile_pic.clone(),
            created_at: account.timestamps.created_at,
        }
    }
}

/// 注册/登录结果：资料加令牌
#[derive(Debug, Clone, Serialize)]
pub struct AuthPayload {
    #[serde(flatten)]
    pub profile: AccountProfile,
    pub token: String,
}

/// 关联展示用的人员摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl<Id: PrincipalId> From<&Account<Id>> for PersonSummary {
    fn from(account: &Account<Id>) -> Self {
        Self {
            id: account.id.uuid(),
            name: account.name.clone(),
            email: account.email.as_str().to_string(),
        }
    }
}

/// 关联展示用的职位摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    #[serde(rename = "_id")]
    pub id: JobId,
    pub job_title: String,
    pub company_name: String,
    pub location: String,
    pub salary: String,
    pub job_type: JobType,
}

impl From<&Job> for JobSummary {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id,
            job_title: job.details.job_title.clone(),
            company_name: job.details.company_name.clone(),
            location: job.details.location.clone(),
            salary: job.details.salary.clone(),
            job_type: job.details.job_type,
        }
    }
}

/// 职位详情
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobView {
    #[serde(rename = "_id")]
    pub id: JobId,
    pub company_name: String,
    pub job_title: String,
    pub role: String,
    pub location: String,
    pub salary: String,
    pub job_type: JobType,
    pub experience: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub skills: Vec<String>,
    pub is_active: bool,
    pub company_logo: Option<String>,
    pub owner_id: AdminId,
    pub posted_by: Option<PersonSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobView {
    pub fn new(job: &Job, posted_by: Option<PersonSummary>) -> Self {
        let details = &job.details;
        Self {
            id: job.id,
            company_name: details.company_name.clone(),
            job_title: details.job_title.clone(),
            role: details.role.clone(),
            location: details.location.clone(),
            salary: details.salary.clone(),
            job_type: details.job_type,
            experience: details.experience.clone(),
            description: details.description.clone(),
            requirements: details.requirements.clone(),
            skills: details.skills.clone(),
            is_active: job.is_active,
            company_logo: job.company_logo.clone(),
            owner_id: job.owner_id,
            posted_by,
            created_at: job.timestamps.created_at,
            updated_at: job.timestamps.updated_at,
        }
    }
}

/// 投递详情，附带求职者与职位摘要
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationView {
    #[serde(rename = "_id")]
    pub id: ApplicationId,
    pub job_id: JobId,
    pub user_id: UserId,
    pub job: Option<JobSummary>,
    pub user: Option<PersonSummary>,
    pub resume: String,
    pub resume_original_name: String,
    pub cover_letter: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationView {
    pub fn new(
        application: &Application,
        job: Option<JobSummary>,
        user: Option<PersonSummary>,
    ) -> Self {
        Self {
            id: application.id,
            job_id: application.job_id,
            user_id: application.user_id,
            job,
            user,
            resume: application.resume.reference.clone(),
            resume_original_name: application.resume.original_name.clone(),
            cover_letter: application.cover_letter.clone(),
            status: application.status,
            created_at: application.timestamps.created_at,
            updated_at: application.timestamps.updated_at,
        }
    }
}

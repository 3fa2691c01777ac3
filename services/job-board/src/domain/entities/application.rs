//! 投递实体与状态

use std::fmt;
use std::str::FromStr;

use recruit_common::{ApplicationId, JobId, Timestamps, UserId};
use recruit_errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use super::job::Job;

pub const INVALID_STATUS_MESSAGE: &str =
    "Invalid status. Valid statuses: pending, reviewed, shortlisted, rejected, accepted";

/// 投递状态
///
/// 五个状态之间可任意切换，没有终态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Shortlisted,
    Rejected,
    Accepted,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Reviewed,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Rejected,
        ApplicationStatus::Accepted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Accepted => "accepted",
        }
    }

    /// 通知中使用的固定说明
    pub fn notice(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Your application is under review.",
            ApplicationStatus::Reviewed => "Your application has been reviewed.",
            ApplicationStatus::Shortlisted => "Congratulations! You have been shortlisted.",
            ApplicationStatus::Rejected => "Unfortunately, your application was not selected.",
            ApplicationStatus::Accepted => "Congratulations! Your application has been accepted.",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 只接受五个小写取值，不做大小写或空白纠正
impl FromStr for ApplicationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::validation(INVALID_STATUS_MESSAGE))
    }
}

/// 已保存的简历
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resume {
    /// FileStore 返回的引用
    pub reference: String,
    pub original_name: String,
}

/// 投递
///
/// (job_id, user_id) 全局唯一，由存储层原子保证
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub user_id: UserId,
    pub resume: Resume,
    pub cover_letter: String,
    pub status: ApplicationStatus,
    pub timestamps: Timestamps,
}

impl Application {
    /// 向职位投递；职位关闭时拒绝
    pub fn submit(
        job: &Job,
        user_id: UserId,
        resume: Resume,
        cover_letter: Option<String>,
    ) -> AppResult<Self> {
        job.ensure_accepting_applications()?;

        Ok(Self {
            id: ApplicationId::new(),
            job_id: job.id,
            user_id,
            resume,
            cover_letter: cover_letter.unwrap_or_default(),
            status: ApplicationStatus::Pending,
            timestamps: Timestamps::new(),
        })
    }

    pub fn set_status(&mut self, status: ApplicationStatus) {
        self.status = status;
        self.timestamps.touch();
    }
}

//! 职位实体

use std::fmt;
use std::str::FromStr;

use recruit_common::{AdminId, JobId, Timestamps};
use recruit_errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// 职位类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[default]
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Contract")]
    Contract,
    #[serde(rename = "Internship")]
    Internship,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Internship,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Internship => "Internship",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| {
                AppError::validation(
                    "Invalid job type. Valid types: Full-time, Part-time, Contract, Internship",
                )
            })
    }
}

/// 创建职位的原始输入，所有字段均可缺失
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub job_type: Option<String>,
    pub experience: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// 校验通过的职位内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetails {
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
}

fn required(value: Option<String>, field: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => v,
        _ => {
            missing.push(field);
            String::new()
        }
    }
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl JobDraft {
    /// 校验必填字段；缺失时错误消息列出全部缺失字段
    pub fn validate(self) -> AppResult<JobDetails> {
        let mut missing = Vec::new();

        let company_name = required(self.company_name, "companyName", &mut missing);
        let job_title = required(self.job_title, "jobTitle", &mut missing);
        let role = required(self.role, "role", &mut missing);
        let location = required(self.location, "location", &mut missing);
        let salary = required(self.salary, "salary", &mut missing);
        let experience = required(self.experience, "experience", &mut missing);
        let description = required(self.description, "description", &mut missing);

        if !missing.is_empty() {
            return Err(AppError::validation(format!(
                "Please provide all required fields (missing: {})",
                missing.join(", ")
            )));
        }

        let job_type = match self.job_type.as_deref().map(str::trim) {
            None | Some("") => JobType::default(),
            Some(raw) => raw.parse()?,
        };

        Ok(JobDetails {
            company_name,
            job_title,
            role,
            location,
            salary,
            job_type,
            experience,
            description,
            requirements: clean_list(self.requirements),
            skills: clean_list(self.skills),
        })
    }
}

/// 职位
///
/// 发布者（owner）在创建后不可变更
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub owner_id: AdminId,
    pub details: JobDetails,
    pub is_active: bool,
    pub company_logo: Option<String>,
    pub timestamps: Timestamps,
}

impl Job {
    /// 发布新职位，默认开放投递
    pub fn post(owner_id: AdminId, details: JobDetails, company_logo: Option<String>) -> Self {
        Self {
            id: JobId::new(),
            owner_id,
            details,
            is_active: true,
            company_logo,
            timestamps: Timestamps::new(),
        }
    }

    /// 关闭的职位不再接受投递
    pub fn ensure_accepting_applications(&self) -> AppResult<()> {
        if self.is_active {
            Ok(())
        } else {
            Err(AppError::invalid_state(
                "This job is no longer accepting applications",
            ))
        }
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.timestamps.touch();
    }
}

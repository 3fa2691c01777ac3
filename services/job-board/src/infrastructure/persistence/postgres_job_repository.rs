//! PostgreSQL 职位 Repository 实现

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use recruit_common::{AdminId, JobId, Timestamps};
use recruit_errors::{AppError, AppResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Job, JobDetails, JobType};
use crate::domain::repositories::{JobFilter, JobRepository};

const COLUMNS: &str = r#"
    id, owner_id, company_name, job_title, role, location, salary, job_type,
    experience, description, requirements, skills, is_active, company_logo,
    created_at, updated_at
"#;

pub struct PostgresJobRepository {
    pool: PgPool,
}

impl PostgresJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PostgresJobRepository {
    async fn find_by_id(&self, id: JobId) -> AppResult<Option<Job>> {
        let sql = format!("SELECT {} FROM jobs WHERE id = $1", COLUMNS);
        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to find job: {}", e)))?;

        row.map(JobRow::into_job).transpose()
    }

    async fn find(&self, filter: &JobFilter) -> AppResult<Vec<Job>> {
        let sql = format!(
            r#"
            SELECT {} FROM jobs
            WHERE ($1::uuid IS NULL OR owner_id = $1)
              AND (NOT $2 OR is_active)
            ORDER BY created_at DESC, id DESC
            "#,
            COLUMNS
        );
        let rows = sqlx::query_as::<_, JobRow>(&sql)
            .bind(filter.owner_id.map(|id| id.0))
            .bind(filter.active_only)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list jobs: {}", e)))?;

        rows.into_iter().map(JobRow::into_job).collect()
    }

    async fn create(&self, job: &Job) -> AppResult<()> {
        let sql = format!(
            r#"
            INSERT INTO jobs ({})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
            COLUMNS
        );
        let d = &job.details;
        sqlx::query(&sql)
            .bind(job.id.0)
            .bind(job.owner_id.0)
            .bind(&d.company_name)
            .bind(&d.job_title)
            .bind(&d.role)
            .bind(&d.location)
            .bind(&d.salary)
            .bind(d.job_type.as_str())
            .bind(&d.experience)
            .bind(&d.description)
            .bind(&d.requirements)
            .bind(&d.skills)
            .bind(job.is_active)
            .bind(&job.company_logo)
            .bind(job.timestamps.created_at)
            .bind(job.timestamps.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to insert job: {}", e)))?;

        Ok(())
    }

    async fn save(&self, job: &Job) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE jobs SET is_active = $2, company_logo = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(job.id.0)
        .bind(job.is_active)
        .bind(&job.company_logo)
        .bind(job.timestamps.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update job: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Job not found"));
        }
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct JobRow {
    id: Uuid,
    owner_id: Uuid,
    company_name: String,
    job_title: String,
    role: String,
    location: String,
    salary: String,
    job_type: String,
    experience: String,
    description: String,
    requirements: Vec<String>,
    skills: Vec<String>,
    is_active: bool,
    company_logo: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl JobRow {
    fn into_job(self) -> AppResult<Job> {
        let job_type: JobType = self
            .job_type
            .parse()
            .map_err(|_| AppError::database(format!("Unknown job type in storage: {}", self.job_type)))?;

        Ok(Job {
            id: JobId::from_uuid(self.id),
            owner_id: AdminId::from_uuid(self.owner_id),
            details: JobDetails {
                company_name: self.company_name,
                job_title: self.job_title,
                role: self.role,
                location: self.location,
                salary: self.salary,
                job_type,
                experience: self.experience,
                description: self.description,
                requirements: self.requirements,
                skills: self.skills,
            },
            is_active: self.is_active,
            company_logo: self.company_logo,
            timestamps: Timestamps {
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        })
    }
}

//! PostgreSQL 投递 Repository 实现
//!
//! (job_id, user_id) 唯一约束在表上声明，插入冲突映射为 Conflict。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use recruit_adapter_postgres::map_write_error;
use recruit_common::{ApplicationId, JobId, Timestamps, UserId};
use recruit_errors::{AppError, AppResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Application, ApplicationStatus, Resume};
use crate::domain::repositories::{
    ApplicationFilter, ApplicationRepository, DUPLICATE_APPLICATION_MESSAGE,
};

const COLUMNS: &str = r#"
    id, job_id, user_id, resume, resume_original_name, cover_letter, status,
    created_at, updated_at
"#;

pub struct PostgresApplicationRepository {
    pool: PgPool,
}

impl PostgresApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationRepository for PostgresApplicationRepository {
    async fn find_by_id(&self, id: ApplicationId) -> AppResult<Option<Application>> {
        let sql = format!("SELECT {} FROM applications WHERE id = $1", COLUMNS);
        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to find application: {}", e)))?;

        row.map(ApplicationRow::into_application).transpose()
    }

    async fn find(&self, filter: &ApplicationFilter) -> AppResult<Vec<Application>> {
        let sql = format!(
            r#"
            SELECT {} FROM applications
            WHERE ($1::uuid[] IS NULL OR job_id = ANY($1))
              AND ($2::uuid IS NULL OR user_id = $2)
            ORDER BY created_at DESC, id DESC
            "#,
            COLUMNS
        );
        let job_ids: Option<Vec<Uuid>> = filter
            .job_ids
            .as_ref()
            .map(|ids| ids.iter().map(|id| id.0).collect());

        let rows = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(job_ids)
            .bind(filter.user_id.map(|id| id.0))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list applications: {}", e)))?;

        rows.into_iter().map(ApplicationRow::into_application).collect()
    }

    async fn create(&self, application: &Application) -> AppResult<()> {
        let sql = format!(
            "INSERT INTO applications ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            COLUMNS
        );
        sqlx::query(&sql)
            .bind(application.id.0)
            .bind(application.job_id.0)
            .bind(application.user_id.0)
            .bind(&application.resume.reference)
            .bind(&application.resume.original_name)
            .bind(&application.cover_letter)
            .bind(application.status.as_str())
            .bind(application.timestamps.created_at)
            .bind(application.timestamps.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_write_error(e, DUPLICATE_APPLICATION_MESSAGE, "Failed to insert application")
            })?;

        Ok(())
    }

    async fn save(&self, application: &Application) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE applications SET status = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(application.id.0)
        .bind(application.status.as_str())
        .bind(application.timestamps.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update application: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Application not found"));
        }
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct ApplicationRow {
    id: Uuid,
    job_id: Uuid,
    user_id: Uuid,
    resume: String,
    resume_original_name: String,
    cover_letter: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ApplicationRow {
    fn into_application(self) -> AppResult<Application> {
        let status: ApplicationStatus = self
            .status
            .parse()
            .map_err(|_| AppError::database(format!("Unknown status in storage: {}", self.status)))?;

        Ok(Application {
            id: ApplicationId::from_uuid(self.id),
            job_id: JobId::from_uuid(self.job_id),
            user_id: UserId::from_uuid(self.user_id),
            resume: Resume {
                reference: self.resume,
                original_name: self.resume_original_name,
            },
            cover_letter: self.cover_letter,
            status,
            timestamps: Timestamps {
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        })
    }
}

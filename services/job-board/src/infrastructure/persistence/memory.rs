//! 内存存储，用于测试与本地开发；重启即丢失

use std::collections::HashMap;

use async_trait::async_trait;
use recruit_common::{ApplicationId, JobId};
use recruit_errors::{AppError, AppResult};
use tokio::sync::RwLock;

use crate::domain::entities::{Account, Application, Job, PrincipalId};
use crate::domain::repositories::{
    ApplicationFilter, ApplicationRepository, DUPLICATE_APPLICATION_MESSAGE, IdentityStore,
    JobFilter, JobRepository, duplicate_account_message,
};
use crate::domain::value_objects::Email;

pub struct InMemoryIdentityStore<Id: PrincipalId> {
    accounts: RwLock<HashMap<Id, Account<Id>>>,
}

impl<Id: PrincipalId> InMemoryIdentityStore<Id> {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }
}

impl<Id: PrincipalId> Default for InMemoryIdentityStore<Id> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<Id: PrincipalId> IdentityStore<Id> for InMemoryIdentityStore<Id> {
    async fn find_by_id(&self, id: Id) -> AppResult<Option<Account<Id>>> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AppResult<Option<Account<Id>>> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|account| account.email == *email)
            .cloned())
    }

    async fn create(&self, account: &Account<Id>) -> AppResult<()> {
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.email == account.email) {
            return Err(AppError::conflict(duplicate_account_message::<Id>()));
        }
        accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn save(&self, account: &Account<Id>) -> AppResult<()> {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(&account.id) {
            Some(existing) => {
                *existing = account.clone();
                Ok(())
            }
            None => Err(AppError::not_found(format!("{} not found", Id::LABEL))),
        }
    }
}

#[derive(Default)]
pub struct InMemoryJobRepository {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn find_by_id(&self, id: JobId) -> AppResult<Option<Job>> {
        Ok(self.jobs.read().await.get(&id).cloned())
    }

    async fn find(&self, filter: &JobFilter) -> AppResult<Vec<Job>> {
        let mut jobs: Vec<Job> = self
            .jobs
            .read()
            .await
            .values()
            .filter(|job| filter.matches(job))
            .cloned()
            .collect();
        jobs.sort_by(|a, b| {
            (b.timestamps.created_at, b.id.0).cmp(&(a.timestamps.created_at, a.id.0))
        });
        Ok(jobs)
    }

    async fn create(&self, job: &Job) -> AppResult<()> {
        self.jobs.write().await.insert(job.id, job.clone());
        Ok(())
    }

    async fn save(&self, job: &Job) -> AppResult<()> {
        let mut jobs = self.jobs.write().await;
        match jobs.get_mut(&job.id) {
            Some(existing) => {
                *existing = job.clone();
                Ok(())
            }
            None => Err(AppError::not_found("Job not found")),
        }
    }
}

/// 检查与插入在同一把写锁内完成
#[derive(Default)]
pub struct InMemoryApplicationRepository {
    applications: RwLock<HashMap<ApplicationId, Application>>,
}

impl InMemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.applications.read().await.len()
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn find_by_id(&self, id: ApplicationId) -> AppResult<Option<Application>> {
        Ok(self.applications.read().await.get(&id).cloned())
    }

    async fn find(&self, filter: &ApplicationFilter) -> AppResult<Vec<Application>> {
        let mut applications: Vec<Application> = self
            .applications
            .read()
            .await
            .values()
            .filter(|application| filter.matches(application))
            .cloned()
            .collect();
        applications.sort_by(|a, b| {
            (b.timestamps.created_at, b.id.0).cmp(&(a.timestamps.created_at, a.id.0))
        });
        Ok(applications)
    }

    async fn create(&self, application: &Application) -> AppResult<()> {
        let mut applications = self.applications.write().await;
        let duplicate = applications
            .values()
            .any(|a| a.job_id == application.job_id && a.user_id == application.user_id);
        if duplicate {
            return Err(AppError::conflict(DUPLICATE_APPLICATION_MESSAGE));
        }
        applications.insert(application.id, application.clone());
        Ok(())
    }

    async fn save(&self, application: &Application) -> AppResult<()> {
        let mut applications = self.applications.write().await;
        match applications.get_mut(&application.id) {
            Some(existing) => {
                existing.status = application.status;
                existing.timestamps.updated_at = application.timestamps.updated_at;
                Ok(())
            }
            None => Err(AppError::not_found("Application not found")),
        }
    }
}

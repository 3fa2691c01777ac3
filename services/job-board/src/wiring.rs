//! 组件装配：存储 -> 应用服务 -> HTTP 状态

use std::path::PathBuf;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use recruit_auth_core::TokenService;
use recruit_common::{AdminId, UserId};
use recruit_ports::{FileStore, NotificationSink};
use sqlx::PgPool;

use crate::api::http::AppState;
use crate::application::{AccountService, ApplicationWorkflow, AuthGate, JobService, ViewAssembler};
use crate::domain::repositories::{ApplicationRepository, IdentityStore, JobRepository};
use crate::infrastructure::persistence::{
    InMemoryApplicationRepository, InMemoryIdentityStore, InMemoryJobRepository,
    PostgresApplicationRepository, PostgresIdentityStore, PostgresJobRepository,
};

/// 四类存储
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn IdentityStore<UserId>>,
    pub admins: Arc<dyn IdentityStore<AdminId>>,
    pub jobs: Arc<dyn JobRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PostgresIdentityStore::users(pool.clone())),
            admins: Arc::new(PostgresIdentityStore::admins(pool.clone())),
            jobs: Arc::new(PostgresJobRepository::new(pool.clone())),
            applications: Arc::new(PostgresApplicationRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryIdentityStore::<UserId>::new()),
            admins: Arc::new(InMemoryIdentityStore::<AdminId>::new()),
            jobs: Arc::new(InMemoryJobRepository::new()),
            applications: Arc::new(InMemoryApplicationRepository::new()),
        }
    }
}

/// HTTP 层需要的运行参数
#[derive(Clone, Default)]
pub struct HttpOptions {
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub metrics: Option<PrometheusHandle>,
    pub database: Option<PgPool>,
}

pub fn build_state(
    stores: Stores,
    tokens: Arc<TokenService>,
    files: Arc<dyn FileStore>,
    sink: Arc<dyn NotificationSink>,
    options: HttpOptions,
) -> AppState {
    let views = ViewAssembler::new(
        stores.users.clone(),
        stores.admins.clone(),
        stores.jobs.clone(),
    );

    AppState {
        users: Arc::new(AccountService::new(
            stores.users.clone(),
            tokens.clone(),
            files.clone(),
        )),
        admins: Arc::new(AccountService::new(
            stores.admins.clone(),
            tokens.clone(),
            files.clone(),
        )),
        user_gate: AuthGate::new(tokens.clone(), stores.users.clone()),
        admin_gate: AuthGate::new(tokens, stores.admins.clone()),
        jobs: Arc::new(JobService::new(
            stores.jobs.clone(),
            stores.applications.clone(),
            files.clone(),
            views.clone(),
        )),
        workflow: Arc::new(ApplicationWorkflow::new(
            stores.jobs,
            stores.applications,
            stores.users,
            files,
            sink,
            views,
        )),
        upload_dir: options.upload_dir,
        max_upload_bytes: options.max_upload_bytes,
        metrics: options.metrics,
        database: options.database,
    }
}

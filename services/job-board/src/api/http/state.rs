//! 路由共享状态

use std::path::PathBuf;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use recruit_common::{AdminId, UserId};
use sqlx::PgPool;

use crate::application::{AccountService, ApplicationWorkflow, AuthGate, JobService};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<AccountService<UserId>>,
    pub admins: Arc<AccountService<AdminId>>,
    pub user_gate: AuthGate<UserId>,
    pub admin_gate: AuthGate<AdminId>,
    pub jobs: Arc<JobService>,
    pub workflow: Arc<ApplicationWorkflow>,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub metrics: Option<PrometheusHandle>,
    /// 用于健康检查；内存模式下为空
    pub database: Option<PgPool>,
}

//! 服务启动器
//!
//! 加载配置 -> 初始化日志 -> 创建基础设施 -> 构建路由 -> 监听并优雅关闭

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use recruit_config::AppConfig;
use recruit_errors::AppResult;
use tracing::info;

use crate::infrastructure::Infrastructure;
use crate::runtime::{init_runtime, shutdown_signal};

/// 运行 HTTP 服务
///
/// ```ignore
/// recruit_bootstrap::run("config", |infra| async move {
///     Ok(build_router(infra))
/// })
/// .await
/// ```
pub async fn run<F, Fut>(config_dir: &str, router_builder: F) -> anyhow::Result<()>
where
    F: FnOnce(Arc<Infrastructure>) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    let config = AppConfig::load(config_dir).context("failed to load configuration")?;
    init_runtime(&config);

    info!(app_name = %config.app_name, "Starting service");

    let infra = Arc::new(Infrastructure::from_config(config).await?);
    let addr = infra.server_addr()?;
    let router = router_builder(infra.clone()).await?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, "HTTP server starting");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    infra.postgres_pool().close().await;
    info!("Service stopped");
    Ok(())
}

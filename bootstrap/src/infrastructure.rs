//! 基础设施资源管理

use std::sync::Arc;

use chrono::Duration;
use metrics_exporter_prometheus::PrometheusHandle;
use recruit_adapter_postgres::{PostgresConfig, create_pool};
use recruit_auth_core::TokenService;
use recruit_config::AppConfig;
use recruit_errors::{AppError, AppResult};
use recruit_telemetry::init_metrics;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::retry::{RetryConfig, with_retry};

/// 基础设施资源容器，启动时创建一次，之后只读
pub struct Infrastructure {
    config: AppConfig,
    postgres_pool: PgPool,
    token_service: Arc<TokenService>,
    metrics_handle: Option<PrometheusHandle>,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（数据库连接带重试）
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let retry_config = RetryConfig::default();

        let pg_config = PostgresConfig::new(config.database.url.expose_secret())
            .with_max_connections(config.database.max_connections);
        let postgres_pool = with_retry(&retry_config, "PostgreSQL connection", || {
            let cfg = pg_config.clone();
            async move { create_pool(&cfg).await }
        })
        .await?;
        info!(
            max_connections = config.database.max_connections,
            "PostgreSQL connection pool created"
        );

        let token_service = Arc::new(TokenService::new(
            config.jwt.secret.expose_secret(),
            Duration::days(config.jwt.expires_in_days),
        ));

        let metrics_handle = if config.telemetry.metrics_enabled {
            match init_metrics() {
                Ok(handle) => Some(handle),
                Err(e) => {
                    warn!(error = %e, "Failed to install Prometheus recorder, metrics disabled");
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            config,
            postgres_pool,
            token_service,
            metrics_handle,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }

    pub fn token_service(&self) -> Arc<TokenService> {
        self.token_service.clone()
    }

    pub fn metrics_handle(&self) -> Option<PrometheusHandle> {
        self.metrics_handle.clone()
    }

    /// 服务监听地址
    pub fn server_addr(&self) -> AppResult<std::net::SocketAddr> {
        self.config
            .server
            .addr()
            .parse()
            .map_err(|e| AppError::internal(format!("Invalid server address: {}", e)))
    }
}

//! job-board 服务入口

use std::sync::Arc;

use recruit_adapter_email::EmailClient;
use recruit_adapter_postgres::MigrationManager;
use recruit_bootstrap::Infrastructure;
use recruit_errors::AppResult;
use recruit_ports::NotificationSink;
use tracing::info;

use job_board::api::http::build_router;
use job_board::infrastructure::file_store::LocalFileStore;
use job_board::infrastructure::notification::LoggingNotificationSink;
use job_board::infrastructure::persistence::migrations;
use job_board::wiring::{HttpOptions, Stores, build_state};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    recruit_bootstrap::run("config", |infra: Arc<Infrastructure>| async move {
        let config = infra.config();
        let pool = infra.postgres_pool();

        if config.database.run_migrations {
            let report = MigrationManager::new(pool.clone())
                .migrate(&migrations())
                .await?;
            info!(
                applied = report.applied_count(),
                skipped = report.skipped.len(),
                "Database migrations finished"
            );
        }

        let sink = notification_sink(&infra)?;
        let files = Arc::new(LocalFileStore::new(&config.storage.upload_dir));

        let state = build_state(
            Stores::postgres(pool.clone()),
            infra.token_service(),
            files,
            sink,
            HttpOptions {
                upload_dir: config.storage.upload_dir.clone().into(),
                max_upload_bytes: config.storage.max_upload_bytes,
                metrics: infra.metrics_handle(),
                database: Some(pool),
            },
        );

        Ok(build_router(state))
    })
    .await
}

/// SMTP 启用时发送邮件，否则只记录日志
fn notification_sink(infra: &Infrastructure) -> AppResult<Arc<dyn NotificationSink>> {
    match infra.config().email.as_ref().filter(|email| email.enabled) {
        Some(email) => {
            info!(smtp_host = %email.smtp_host, "SMTP notifications enabled");
            Ok(Arc::new(EmailClient::new(email.clone())?))
        }
        None => {
            info!("SMTP disabled, notifications will be logged only");
            Ok(Arc::new(LoggingNotificationSink))
        }
    }
}

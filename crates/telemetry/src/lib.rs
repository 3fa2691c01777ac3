//! telemetry - 可观测性库
//!
//! tracing 初始化、Prometheus 指标与健康检查状态

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// 指标名称
pub mod names {
    pub const APPLICATIONS_SUBMITTED: &str = "applications_submitted_total";
    pub const APPLICATION_TRANSITIONS: &str = "application_transitions_total";
    pub const NOTIFICATIONS: &str = "notifications_total";
    pub const AUTH_REJECTIONS: &str = "auth_rejections_total";
}

/// 初始化 tracing
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// 初始化 JSON 格式的 tracing（生产环境）
pub fn init_tracing_json(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .init();
}

/// 初始化 Prometheus metrics
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_metrics();
    Ok(handle)
}

fn describe_metrics() {
    metrics::describe_counter!(names::APPLICATIONS_SUBMITTED, "Applications accepted");
    metrics::describe_counter!(
        names::APPLICATION_TRANSITIONS,
        "Application status transitions persisted, by target status"
    );
    metrics::describe_counter!(
        names::NOTIFICATIONS,
        "Status notification attempts, by outcome"
    );
    metrics::describe_counter!(
        names::AUTH_REJECTIONS,
        "Requests rejected by an authentication gate"
    );
}

pub fn record_submission() {
    metrics::counter!(names::APPLICATIONS_SUBMITTED).increment(1);
}

pub fn record_transition(status: &'static str) {
    metrics::counter!(names::APPLICATION_TRANSITIONS, "status" => status).increment(1);
}

pub fn record_notification(outcome: &'static str) {
    metrics::counter!(names::NOTIFICATIONS, "outcome" => outcome).increment(1);
}

pub fn record_auth_rejection(gate: &'static str) {
    metrics::counter!(names::AUTH_REJECTIONS, "gate" => gate).increment(1);
}

/// 健康检查状态
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub healthy: bool,
    pub checks: Vec<HealthCheck>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthStatus {
    pub fn new() -> Self {
        Self {
            healthy: true,
            checks: Vec::new(),
        }
    }

    pub fn add_check(&mut self, name: impl Into<String>, healthy: bool, message: Option<String>) {
        if !healthy {
            self.healthy = false;
        }
        self.checks.push(HealthCheck {
            name: name.into(),
            healthy,
            message,
        });
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_check_marks_unhealthy() {
        let mut status = HealthStatus::new();
        status.add_check("database", true, None);
        assert!(status.healthy);

        status.add_check("smtp", false, Some("connection refused".into()));
        assert!(!status.healthy);
        assert_eq!(status.checks.len(), 2);
    }

    #[test]
    fn test_counters_without_recorder_are_noops() {
        record_submission();
        record_transition("shortlisted");
        record_notification("failed");
        record_auth_rejection("admin");
    }
}

//! 健康检查与指标

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use recruit_adapter_postgres::check_connection;
use recruit_telemetry::HealthStatus;

use crate::api::http::state::AppState;

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let mut status = HealthStatus::new();

    if let Some(pool) = &state.database {
        match check_connection(pool).await {
            Ok(()) => status.add_check("database", true, None),
            Err(e) => status.add_check("database", false, Some(e.to_string())),
        }
    }

    let code = if status.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

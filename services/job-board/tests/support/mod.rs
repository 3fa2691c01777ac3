//! 集成测试共用设施：内存存储、可观测的通知端、HTTP 请求构造

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use job_board::api::http::{AppState, build_router};
use job_board::application::{FileUpload, RegisterCommand};
use job_board::infrastructure::file_store::LocalFileStore;
use job_board::wiring::{HttpOptions, Stores, build_state};
use recruit_auth_core::TokenService;
use recruit_errors::{AppError, AppResult};
use recruit_ports::{Notification, NotificationSink};
use serde_json::Value;
use tokio::sync::Mutex;
use tower::ServiceExt;

pub const TOKEN_SECRET: &str = "integration-secret";
const BOUNDARY: &str = "recruit-test-boundary";

/// 记录所有通知
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub async fn sent(&self) -> Vec<Notification> {
        self.sent.lock().await.clone()
    }

    /// 等待后台任务写入指定条数，最多约 2 秒
    pub async fn wait_for(&self, count: usize) -> Vec<Notification> {
        for _ in 0..200 {
            let sent = self.sent().await;
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.sent().await
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn send(&self, notification: &Notification) -> AppResult<()> {
        self.sent.lock().await.push(notification.clone());
        Ok(())
    }
}

/// 每次发送都失败，并记录尝试次数
#[derive(Default)]
pub struct FailingSink {
    attempts: Mutex<usize>,
}

impl FailingSink {
    pub async fn attempts(&self) -> usize {
        *self.attempts.lock().await
    }
}

#[async_trait]
impl NotificationSink for FailingSink {
    async fn send(&self, _notification: &Notification) -> AppResult<()> {
        *self.attempts.lock().await += 1;
        Err(AppError::external_service("SMTP unavailable"))
    }
}

pub struct TestApp {
    pub stores: Stores,
    pub state: AppState,
    pub tokens: Arc<TokenService>,
}

impl TestApp {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self::with_stores(Stores::in_memory(), sink)
    }

    pub fn with_stores(stores: Stores, sink: Arc<dyn NotificationSink>) -> Self {
        let tokens = Arc::new(TokenService::with_default_ttl(TOKEN_SECRET));
        let upload_dir =
            std::env::temp_dir().join(format!("recruit-it-{}", uuid::Uuid::now_v7()));
        let files = Arc::new(LocalFileStore::new(upload_dir.clone()));

        let state = build_state(
            stores.clone(),
            tokens.clone(),
            files,
            sink,
            HttpOptions {
                upload_dir,
                max_upload_bytes: 10 * 1024 * 1024,
                metrics: None,
                database: None,
            },
        );

        Self {
            stores,
            state,
            tokens,
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}

pub fn register_command(name: &str, email: &str) -> RegisterCommand {
    RegisterCommand {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        password: Some("secret123".to_string()),
    }
}

pub fn resume() -> Option<FileUpload> {
    Some(FileUpload {
        original_name: "cv.pdf".to_string(),
        bytes: b"%PDF-1.4 resume".to_vec(),
    })
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("valid request")
}

/// multipart 表单：文本字段与文件字段
pub fn multipart_request(
    uri: &str,
    token: &str,
    fields: &[(&str, &str)],
    files: &[(&str, &str, &[u8])],
) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (name, file_name, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body))
        .expect("valid request")
}

pub fn job_body() -> Value {
    serde_json::json!({
        "companyName": "Acme",
        "jobTitle": "Rust Engineer",
        "role": "Backend",
        "location": "Remote",
        "salary": "100k",
        "experience": "3 years",
        "description": "Build services",
        "skills": ["Rust", "SQL"]
    })
}

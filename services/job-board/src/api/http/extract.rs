//! 请求提取器：JSON 请求体、路径 ID、multipart 表单
//!
//! 解析失败统一转为 AppError，保证错误响应格式一致。

use std::collections::HashMap;

use axum::Json;
use axum::extract::{FromRequest, Multipart, Request};
use recruit_errors::{AppError, AppResult};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::application::FileUpload;

/// JSON 请求体，解析失败返回 400
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// 解析路径中的 ID；格式非法视同不存在
pub fn path_id<T: From<Uuid>>(raw: &str, not_found: &str) -> AppResult<T> {
    Uuid::parse_str(raw)
        .map(T::from)
        .map_err(|_| AppError::not_found(not_found))
}

/// 已读入内存的 multipart 表单
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, Vec<String>>,
    files: HashMap<String, FileUpload>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(e.body_text()))?
        {
            let Some(name) = field.name().map(|n| n.trim_end_matches("[]").to_string()) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(original_name) => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(e.body_text()))?;
                    form.files.insert(
                        name,
                        FileUpload {
                            original_name,
                            bytes: bytes.to_vec(),
                        },
                    );
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::validation(e.body_text()))?;
                    form.fields.entry(name).or_default().push(text);
                }
            }
        }

        Ok(form)
    }

    /// 单值字段，取最后一次出现的值
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).and_then(|values| values.last().cloned())
    }

    /// 列表字段：重复字段、JSON 数组或逗号分隔均可
    pub fn list(&self, name: &str) -> Vec<String> {
        self.fields
            .get(name)
            .map(|values| values.iter().flat_map(|v| split_list(v)).collect())
            .unwrap_or_default()
    }

    pub fn take_file(&mut self, name: &str) -> Option<FileUpload> {
        self.files.remove(name)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        if let Ok(items) = serde_json::from_str::<Vec<String>>(trimmed) {
            return items;
        }
    }
    trimmed
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

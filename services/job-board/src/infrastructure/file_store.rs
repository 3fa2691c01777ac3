//! 本地磁盘文件存储
//!
//! 文件写入 `{root}/{category}/{uuid}-{name}`，引用为 `/uploads/{category}/{uuid}-{name}`，
//! 由 HTTP 层以静态目录方式提供。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use recruit_common::sanitize_file_name;
use recruit_errors::{AppError, AppResult};
use recruit_ports::{FileCategory, FileStore};
use tracing::debug;
use uuid::Uuid;

/// 引用的公共前缀
pub const UPLOADS_PREFIX: &str = "/uploads";

pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// 校验扩展名、大小与非空
fn validate(category: FileCategory, original_name: &str, bytes: &[u8]) -> AppResult<()> {
    if bytes.is_empty() {
        return Err(AppError::validation("Uploaded file is empty"));
    }

    let allowed = category.allowed_extensions();
    let accepted = extension(original_name).is_some_and(|ext| allowed.contains(&ext.as_str()));
    if !accepted {
        return Err(AppError::validation(format!(
            "Invalid file type. Allowed types: {}",
            allowed.join(", ")
        )));
    }

    let limit = category.max_bytes();
    if bytes.len() > limit {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            limit / (1024 * 1024)
        )));
    }

    Ok(())
}

/// 引用还原为根目录下的路径，只接受已知类别下的单个文件名
fn resolve(root: &Path, reference: &str) -> Option<PathBuf> {
    let rest = reference.strip_prefix(UPLOADS_PREFIX)?.strip_prefix('/')?;
    let (category, file_name) = rest.split_once('/')?;
    let known = [
        FileCategory::Resume,
        FileCategory::CompanyLogo,
        FileCategory::ProfilePic,
    ]
    .iter()
    .any(|c| c.as_str() == category);
    let plain = !file_name.is_empty()
        && file_name != ".."
        && !file_name.contains(['/', '\\']);
    (known && plain).then(|| root.join(category).join(file_name))
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn store(
        &self,
        category: FileCategory,
        original_name: &str,
        bytes: &[u8],
    ) -> AppResult<String> {
        validate(category, original_name, bytes)?;

        let file_name = format!("{}-{}", Uuid::now_v7(), sanitize_file_name(original_name));
        let dir = self.root.join(category.as_str());

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create upload dir: {}", e)))?;
        tokio::fs::write(dir.join(&file_name), bytes)
            .await
            .map_err(|e| AppError::internal(format!("Failed to write upload: {}", e)))?;

        debug!(category = %category, file = %file_name, size = bytes.len(), "File stored");
        Ok(format!("{}/{}/{}", UPLOADS_PREFIX, category.as_str(), file_name))
    }

    async fn remove(&self, reference: &str) -> AppResult<()> {
        let path = resolve(&self.root, reference).ok_or_else(|| {
            AppError::internal(format!("Unrecognized file reference: {}", reference))
        })?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(reference = %reference, "File removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::internal(format!("Failed to remove upload: {}", e))),
        }
    }
}

//! 文件存储 trait 定义

use async_trait::async_trait;
use recruit_errors::AppResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 上传文件类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    Resume,
    CompanyLogo,
    ProfilePic,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Resume => "resumes",
            FileCategory::CompanyLogo => "company_logos",
            FileCategory::ProfilePic => "profile_pics",
        }
    }

    /// 允许的扩展名（小写）
    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            FileCategory::Resume => &["pdf", "doc", "docx"],
            FileCategory::CompanyLogo | FileCategory::ProfilePic => {
                &["jpg", "jpeg", "png", "gif", "webp"]
            }
        }
    }

    /// 单个文件大小上限（字节）
    pub fn max_bytes(&self) -> usize {
        match self {
            FileCategory::Resume => 10 * 1024 * 1024,
            FileCategory::CompanyLogo => 2 * 1024 * 1024,
            FileCategory::ProfilePic => 5 * 1024 * 1024,
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 文件存储
///
/// 返回的引用字符串由调用方原样保存和回显
#[async_trait]
pub trait FileStore: Send + Sync {
    /// 保存文件，返回稳定引用
    async fn store(
        &self,
        category: FileCategory,
        original_name: &str,
        bytes: &[u8],
    ) -> AppResult<String>;

    /// 删除 `store` 返回的引用，文件不存在时视为成功
    async fn remove(&self, reference: &str) -> AppResult<()>;
}

//! 邮件模板系统

use recruit_errors::{AppError, AppResult};
use std::collections::HashMap;
use tera::Tera;
use tracing::debug;

/// 通知邮件 HTML 布局模板名
pub const NOTIFICATION_LAYOUT: &str = "notification.html";

const NOTIFICATION_LAYOUT_SOURCE: &str = r#"<!DOCTYPE html>
<html>
  <body style="font-family: Arial, sans-serif; color: #222;">
    <h2>{{ subject }}</h2>
    <p>{{ body | escape | linebreaksbr | safe }}</p>
  </body>
</html>
"#;

/// 邮件模板管理器
pub struct EmailTemplate {
    tera: Tera,
}

impl EmailTemplate {
    /// 从目录加载 `*.html` 模板
    pub fn new(template_dir: &str) -> AppResult<Self> {
        let pattern = format!("{}/**/*.html", template_dir);
        let tera = Tera::new(&pattern)
            .map_err(|e| AppError::internal(format!("Failed to load email templates: {}", e)))?;

        debug!(template_dir = %template_dir, "Email templates loaded");
        Ok(Self { tera })
    }

    /// 从内存中的模板字符串创建
    pub fn from_strings(templates: HashMap<String, String>) -> AppResult<Self> {
        let mut tera = Tera::default();

        for (name, content) in templates {
            tera.add_raw_template(&name, &content).map_err(|e| {
                AppError::internal(format!("Failed to add template {}: {}", name, e))
            })?;
        }

        Ok(Self { tera })
    }

    /// 内置的通知布局
    pub fn builtin() -> AppResult<Self> {
        Self::from_strings(HashMap::from([(
            NOTIFICATION_LAYOUT.to_string(),
            NOTIFICATION_LAYOUT_SOURCE.to_string(),
        )]))
    }

    /// 渲染模板
    pub fn render(&self, template_name: &str, context: &serde_json::Value) -> AppResult<String> {
        let context = tera::Context::from_serialize(context)
            .map_err(|e| AppError::internal(format!("Failed to create template context: {}", e)))?;

        self.tera.render(template_name, &context).map_err(|e| {
            AppError::internal(format!(
                "Failed to render template {}: {}",
                template_name, e
            ))
        })
    }

    /// 用 HTML 布局包装纯文本通知
    pub fn render_notification(&self, subject: &str, body: &str) -> AppResult<String> {
        self.render(
            NOTIFICATION_LAYOUT,
            &serde_json::json!({ "subject": subject, "body": body }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_from_strings() {
        let templates = HashMap::from([(
            "test.html".to_string(),
            "<h1>Hello {{ name }}!</h1>".to_string(),
        )]);
        let template = EmailTemplate::from_strings(templates).unwrap();

        let result = template
            .render("test.html", &serde_json::json!({ "name": "World" }))
            .unwrap();
        assert_eq!(result, "<h1>Hello World!</h1>");
    }

    #[test]
    fn test_notification_layout_escapes_and_breaks_lines() {
        let template = EmailTemplate::builtin().unwrap();
        let html = template
            .render_notification("Update", "Dear <b>Jane</b>,\nStatus: SHORTLISTED")
            .unwrap();

        assert!(html.contains("&lt;b&gt;Jane&lt;&#x2F;b&gt;"));
        assert!(html.contains("<br>"));
        assert!(html.contains("Status: SHORTLISTED"));
    }
}

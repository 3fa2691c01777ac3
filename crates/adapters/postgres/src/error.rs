//! sqlx 错误映射

use recruit_errors::AppError;

/// PostgreSQL unique_violation
pub const UNIQUE_VIOLATION: &str = "23505";

/// 是否为唯一约束冲突
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

/// 映射写入错误：唯一约束冲突转为 Conflict，其余为 Database
pub fn map_write_error(err: sqlx::Error, conflict_message: &str, context: &str) -> AppError {
    if is_unique_violation(&err) {
        AppError::conflict(conflict_message)
    } else {
        AppError::database(format!("{}: {}", context, err))
    }
}

//! 认证中间件与当前主体提取器
//!
//! 中间件通过 AuthGate 校验令牌，并把账户放入请求扩展；
//! 处理函数再用 `Authenticated<Id>` 取出。

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use recruit_common::{AdminId, UserId};
use recruit_errors::AppError;

use crate::api::http::state::AppState;
use crate::application::AuthGate;
use crate::application::auth_gate::NO_TOKEN_MESSAGE;
use crate::domain::entities::{Account, PrincipalId};

/// 已通过闸门的账户
#[derive(Debug, Clone)]
pub struct Authenticated<Id: PrincipalId>(pub Account<Id>);

pub type CurrentUser = Authenticated<UserId>;
pub type CurrentAdmin = Authenticated<AdminId>;

impl<S, Id> FromRequestParts<S> for Authenticated<Id>
where
    S: Send + Sync,
    Id: PrincipalId,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Authenticated<Id>>()
            .cloned()
            .ok_or_else(|| AppError::unauthenticated(NO_TOKEN_MESSAGE))
    }
}

async fn authenticate<Id: PrincipalId>(
    gate: &AuthGate<Id>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    let account = gate.authenticate(header.as_deref()).await?;
    request.extensions_mut().insert(Authenticated(account));
    Ok(next.run(request).await)
}

pub async fn require_user(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authenticate(&state.user_gate, request, next).await
}

pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authenticate(&state.admin_gate, request, next).await
}

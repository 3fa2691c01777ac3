//! 账户路由：注册、登录、资料、头像

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use recruit_errors::{AppError, AppResult};
use serde::Deserialize;

use crate::api::http::extract::{ApiJson, MultipartForm};
use crate::api::http::middleware::{Authenticated, CurrentAdmin, CurrentUser};
use crate::api::http::response::ApiResponse;
use crate::api::http::state::AppState;
use crate::application::views::{AccountProfile, AuthPayload};
use crate::application::{AccountService, LoginCommand, RegisterCommand};
use crate::domain::entities::PrincipalId;

type Created<T> = (StatusCode, Json<ApiResponse<T>>);

async fn register<Id: PrincipalId>(
    service: &AccountService<Id>,
    command: RegisterCommand,
) -> AppResult<Created<AuthPayload>> {
    let payload = service.register(command).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            format!("{} registered successfully", Id::LABEL),
            payload,
        )),
    ))
}

async fn login<Id: PrincipalId>(
    service: &AccountService<Id>,
    command: LoginCommand,
) -> AppResult<Json<ApiResponse<AuthPayload>>> {
    let payload = service.login(command).await?;
    Ok(Json(ApiResponse::with_message("Login successful", payload)))
}

async fn upload_profile_pic<Id: PrincipalId>(
    service: &AccountService<Id>,
    Authenticated(account): Authenticated<Id>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<AccountProfile>>> {
    let mut form = MultipartForm::read(multipart).await?;
    let upload = form
        .take_file("profilePic")
        .ok_or_else(|| AppError::validation("Please upload a profile picture"))?;

    let profile = service
        .upload_profile_pic(account.id, &upload.original_name, &upload.bytes)
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Profile picture updated successfully",
        profile,
    )))
}

pub async fn register_user(
    State(state): State<AppState>,
    ApiJson(command): ApiJson<RegisterCommand>,
) -> AppResult<Created<AuthPayload>> {
    register(&state.users, command).await
}

pub async fn login_user(
    State(state): State<AppState>,
    ApiJson(command): ApiJson<LoginCommand>,
) -> AppResult<Json<ApiResponse<AuthPayload>>> {
    login(&state.users, command).await
}

pub async fn user_profile(
    State(state): State<AppState>,
    Authenticated(account): CurrentUser,
) -> AppResult<Json<ApiResponse<AccountProfile>>> {
    Ok(Json(ApiResponse::ok(state.users.profile(account.id).await?)))
}

pub async fn upload_user_profile_pic(
    State(state): State<AppState>,
    current: CurrentUser,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<AccountProfile>>> {
    upload_profile_pic(&state.users, current, multipart).await
}

pub async fn register_admin(
    State(state): State<AppState>,
    ApiJson(command): ApiJson<RegisterCommand>,
) -> AppResult<Created<AuthPayload>> {
    register(&state.admins, command).await
}

pub async fn login_admin(
    State(state): State<AppState>,
    ApiJson(command): ApiJson<LoginCommand>,
) -> AppResult<Json<ApiResponse<AuthPayload>>> {
    login(&state.admins, command).await
}

pub async fn admin_profile(
    State(state): State<AppState>,
    Authenticated(account): CurrentAdmin,
) -> AppResult<Json<ApiResponse<AccountProfile>>> {
    Ok(Json(ApiResponse::ok(state.admins.profile(account.id).await?)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePicRequest {
    pub profile_pic: Option<String>,
}

pub async fn update_admin_profile_pic(
    State(state): State<AppState>,
    Authenticated(account): CurrentAdmin,
    ApiJson(request): ApiJson<ProfilePicRequest>,
) -> AppResult<Json<ApiResponse<AccountProfile>>> {
    let profile = state
        .admins
        .update_profile_pic(account.id, request.profile_pic)
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Profile picture updated successfully",
        profile,
    )))
}

pub async fn upload_admin_profile_pic(
    State(state): State<AppState>,
    current: CurrentAdmin,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<AccountProfile>>> {
    upload_profile_pic(&state.admins, current, multipart).await
}

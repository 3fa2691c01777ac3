//! 投递路由

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use recruit_common::{ApplicationId, JobId};
use recruit_errors::AppResult;
use serde::Deserialize;

use crate::api::http::extract::{ApiJson, MultipartForm, path_id};
use crate::api::http::middleware::{Authenticated, CurrentAdmin, CurrentUser};
use crate::api::http::response::ApiResponse;
use crate::api::http::state::AppState;
use crate::application::jobs::JOB_NOT_FOUND;
use crate::application::views::ApplicationView;
use crate::application::workflow::APPLICATION_NOT_FOUND;

const STATUS_UPDATED: &str = "Application status updated successfully";

/// multipart：`resume` 文件与可选 `coverLetter`
pub async fn submit_application(
    State(state): State<AppState>,
    Authenticated(user): CurrentUser,
    Path(job_id): Path<String>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<ApplicationView>>)> {
    let job_id: JobId = path_id(&job_id, JOB_NOT_FOUND)?;
    let mut form = MultipartForm::read(multipart).await?;
    let resume = form.take_file("resume");
    let cover_letter = form.text("coverLetter");

    let application = state
        .workflow
        .submit(user.id, job_id, resume, cover_letter)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Application submitted successfully",
            application,
        )),
    ))
}

pub async fn my_applications(
    State(state): State<AppState>,
    Authenticated(user): CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<ApplicationView>>>> {
    Ok(Json(ApiResponse::list(
        state.workflow.my_applications(user.id).await?,
    )))
}

pub async fn admin_applications(
    State(state): State<AppState>,
    Authenticated(admin): CurrentAdmin,
) -> AppResult<Json<ApiResponse<Vec<ApplicationView>>>> {
    Ok(Json(ApiResponse::list(
        state.workflow.admin_applications(admin.id).await?,
    )))
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: Option<String>,
    pub message: Option<String>,
}

/// 变更状态；通知在后台发送，不等待结果
pub async fn update_status(
    State(state): State<AppState>,
    Authenticated(admin): CurrentAdmin,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<StatusRequest>,
) -> AppResult<Json<ApiResponse<ApplicationView>>> {
    let id: ApplicationId = path_id(&id, APPLICATION_NOT_FOUND)?;
    let outcome = state
        .workflow
        .transition(
            id,
            admin.id,
            request.status.as_deref().unwrap_or_default(),
            request.message,
        )
        .await?;

    Ok(Json(ApiResponse::with_message(
        STATUS_UPDATED,
        outcome.application,
    )))
}

pub async fn update_status_silently(
    State(state): State<AppState>,
    Authenticated(admin): CurrentAdmin,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<StatusRequest>,
) -> AppResult<Json<ApiResponse<ApplicationView>>> {
    let id: ApplicationId = path_id(&id, APPLICATION_NOT_FOUND)?;
    let application = state
        .workflow
        .transition_silently(id, admin.id, request.status.as_deref().unwrap_or_default())
        .await?;

    Ok(Json(ApiResponse::with_message(
        format!("{} (no email sent)", STATUS_UPDATED),
        application,
    )))
}

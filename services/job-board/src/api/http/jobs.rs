//! 职位路由

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use recruit_common::JobId;
use recruit_errors::{AppError, AppResult};
use serde::Deserialize;

use crate::api::http::extract::{ApiJson, MultipartForm, path_id};
use crate::api::http::middleware::{Authenticated, CurrentAdmin};
use crate::api::http::response::ApiResponse;
use crate::api::http::state::AppState;
use crate::application::jobs::JOB_NOT_FOUND;
use crate::application::views::{ApplicationView, JobView};
use crate::domain::entities::JobDraft;

const JOB_POSTED: &str = "Job posted successfully";

fn draft_from_form(form: &MultipartForm) -> JobDraft {
    JobDraft {
        company_name: form.text("companyName"),
        job_title: form.text("jobTitle"),
        role: form.text("role"),
        location: form.text("location"),
        salary: form.text("salary"),
        job_type: form.text("jobType"),
        experience: form.text("experience"),
        description: form.text("description"),
        requirements: form.list("requirements"),
        skills: form.list("skills"),
    }
}

/// multipart 创建，可附带 `companyLogo`
pub async fn create_job(
    State(state): State<AppState>,
    Authenticated(admin): CurrentAdmin,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<JobView>>)> {
    let mut form = MultipartForm::read(multipart).await?;
    let logo = form.take_file("companyLogo");
    let job = state
        .jobs
        .create(admin.id, draft_from_form(&form), logo)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(JOB_POSTED, job)),
    ))
}

/// JSON 创建，无 Logo
pub async fn create_job_without_logo(
    State(state): State<AppState>,
    Authenticated(admin): CurrentAdmin,
    ApiJson(draft): ApiJson<JobDraft>,
) -> AppResult<(StatusCode, Json<ApiResponse<JobView>>)> {
    let job = state.jobs.create(admin.id, draft, None).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(JOB_POSTED, job)),
    ))
}

pub async fn list_all_jobs(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<JobView>>>> {
    Ok(Json(ApiResponse::list(state.jobs.list_all().await?)))
}

pub async fn list_my_jobs(
    State(state): State<AppState>,
    Authenticated(admin): CurrentAdmin,
) -> AppResult<Json<ApiResponse<Vec<JobView>>>> {
    Ok(Json(ApiResponse::list(state.jobs.list_mine(admin.id).await?)))
}

pub async fn list_open_jobs(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<JobView>>>> {
    Ok(Json(ApiResponse::list(state.jobs.list_open().await?)))
}

pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<JobView>>> {
    let id: JobId = path_id(&id, JOB_NOT_FOUND)?;
    Ok(Json(ApiResponse::ok(state.jobs.get_open(id).await?)))
}

pub async fn job_applications(
    State(state): State<AppState>,
    Authenticated(admin): CurrentAdmin,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<ApplicationView>>>> {
    let id: JobId = path_id(&id, JOB_NOT_FOUND)?;
    let applications = state.jobs.applications_for_job(admin.id, id).await?;
    Ok(Json(ApiResponse::list(applications)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusRequest {
    pub is_active: Option<bool>,
}

pub async fn set_job_status(
    State(state): State<AppState>,
    Authenticated(admin): CurrentAdmin,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<JobStatusRequest>,
) -> AppResult<Json<ApiResponse<JobView>>> {
    let id: JobId = path_id(&id, JOB_NOT_FOUND)?;
    let active = request
        .is_active
        .ok_or_else(|| AppError::validation("Please provide isActive"))?;

    let job = state.jobs.set_active(admin.id, id, active).await?;
    Ok(Json(ApiResponse::with_message(
        "Job status updated successfully",
        job,
    )))
}

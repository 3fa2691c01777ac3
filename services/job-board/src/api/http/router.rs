//! 路由装配

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api::http::state::AppState;
use crate::api::http::{accounts, applications, health, jobs};

pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health))
        .route("/metrics", get(health::metrics))
        .route("/api/users/register", post(accounts::register_user))
        .route("/api/users/login", post(accounts::login_user))
        .route("/api/admin/register", post(accounts::register_admin))
        .route("/api/admin/login", post(accounts::login_admin))
        .route("/api/jobs", get(jobs::list_open_jobs))
        .route("/api/jobs/{id}", get(jobs::get_job));

    let user = Router::new()
        .route("/api/users/profile", get(accounts::user_profile))
        .route(
            "/api/users/upload-profile-pic",
            post(accounts::upload_user_profile_pic),
        )
        .route(
            "/api/applications/my-applications",
            get(applications::my_applications),
        )
        .route(
            "/api/applications/{jobId}",
            post(applications::submit_application),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            crate::api::http::middleware::require_user,
        ));

    let admin = Router::new()
        .route("/api/admin/profile", get(accounts::admin_profile))
        .route(
            "/api/admin/profile-pic",
            put(accounts::update_admin_profile_pic),
        )
        .route(
            "/api/admin/upload-profile-pic",
            post(accounts::upload_admin_profile_pic),
        )
        .route(
            "/api/admin/jobs",
            post(jobs::create_job).get(jobs::list_all_jobs),
        )
        .route("/api/admin/jobs/no-logo", post(jobs::create_job_without_logo))
        .route("/api/admin/jobs/my-jobs", get(jobs::list_my_jobs))
        .route(
            "/api/admin/jobs/{jobId}/applications",
            get(jobs::job_applications),
        )
        .route("/api/admin/jobs/{jobId}/status", put(jobs::set_job_status))
        .route(
            "/api/admin/applications",
            get(applications::admin_applications),
        )
        .route(
            "/api/admin/applications/{id}/status",
            put(applications::update_status),
        )
        .route(
            "/api/admin/applications/{id}/status-no-email",
            put(applications::update_status_silently),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            crate::api::http::middleware::require_admin,
        ));

    Router::new()
        .merge(public)
        .merge(user)
        .merge(admin)
        .nest_service("/uploads", ServeDir::new(&state.upload_dir))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

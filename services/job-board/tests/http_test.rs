//! HTTP 接口集成测试

mod support;

use std::sync::Arc;

use axum::http::StatusCode;
use job_board::domain::repositories::IdentityStore;
use recruit_common::UserId;
use serde_json::{Value, json};
use support::{RecordingSink, TestApp, get_request, job_body, json_request, multipart_request};

async fn register(app: &TestApp, kind: &str, name: &str, email: &str) -> (String, String) {
    let (status, body) = app
        .send(json_request(
            "POST",
            &format!("/api/{kind}/register"),
            None,
            json!({"name": name, "email": email, "password": "secret123"}),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    (
        body["data"]["token"].as_str().unwrap().to_string(),
        body["data"]["_id"].as_str().unwrap().to_string(),
    )
}

async fn post_job(app: &TestApp, token: &str) -> String {
    let (status, body) = app
        .send(json_request("POST", "/api/admin/jobs/no-logo", Some(token), job_body()))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["_id"].as_str().unwrap().to_string()
}

async fn apply(app: &TestApp, token: &str, job_id: &str) -> (StatusCode, Value) {
    app.send(multipart_request(
        &format!("/api/applications/{job_id}"),
        token,
        &[("coverLetter", "I would love to join")],
        &[("resume", "cv.pdf", b"%PDF-1.4 resume")],
    ))
    .await
}

#[tokio::test]
async fn full_application_scenario() {
    let sink = Arc::new(RecordingSink::default());
    let app = TestApp::new(sink.clone());

    let (owner, _) = register(&app, "admin", "Owner", "owner@example.com").await;
    let (stranger, _) = register(&app, "admin", "Stranger", "stranger@example.com").await;
    let (user, _) = register(&app, "users", "Jane", "jane@example.com").await;
    let job_id = post_job(&app, &owner).await;

    let (status, body) = apply(&app, &user, &job_id).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["coverLetter"], "I would love to join");
    let application_id = body["data"]["_id"].as_str().unwrap().to_string();

    let (status, body) = apply(&app, &user, &job_id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "You have already applied for this job");

    let uri = format!("/api/admin/applications/{application_id}/status");
    let (status, body) = app
        .send(json_request("PUT", &uri, Some(&stranger), json!({"status": "shortlisted"})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Not authorized to update this application");

    let (status, body) = app
        .send(json_request(
            "PUT",
            &uri,
            Some(&owner),
            json!({"status": "shortlisted", "message": "Let's talk"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "shortlisted");

    let (_, mine) = app
        .send(get_request("/api/applications/my-applications", Some(&user)))
        .await;
    assert_eq!(mine["count"], 1);
    assert_eq!(mine["data"][0]["status"], "shortlisted");

    let sent = sink.wait_for(1).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient_address, "jane@example.com");
}

#[tokio::test]
async fn deactivated_user_with_valid_token_is_rejected() {
    let app = TestApp::new(Arc::new(RecordingSink::default()));
    let (token, id) = register(&app, "users", "Jane", "jane@example.com").await;

    let (status, _) = app.send(get_request("/api/users/profile", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    let id = UserId::from_string(&id).unwrap();
    let mut account = app.stores.users.find_by_id(id).await.unwrap().unwrap();
    account.deactivate();
    app.stores.users.save(&account).await.unwrap();

    let (status, body) = app.send(get_request("/api/users/profile", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized, token failed");
}

#[tokio::test]
async fn gates_reject_missing_and_cross_role_tokens() {
    let app = TestApp::new(Arc::new(RecordingSink::default()));
    let (user, _) = register(&app, "users", "Jane", "jane@example.com").await;

    let (status, body) = app.send(get_request("/api/admin/profile", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized, no token");

    let (status, _) = app.send(get_request("/api/admin/profile", Some(&user))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(get_request("/api/users/profile", Some("not-a-jwt")))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_flow() {
    let app = TestApp::new(Arc::new(RecordingSink::default()));
    register(&app, "admin", "Owner", "owner@example.com").await;

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/admin/login",
            None,
            json!({"email": "OWNER@example.com", "password": "secret123"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["data"]["role"], "admin");

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/admin/login",
            None,
            json!({"email": "owner@example.com", "password": "wrong-pass"}),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");

    let (status, body) = app
        .send(json_request("POST", "/api/admin/login", None, json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please provide email and password");
}

#[tokio::test]
async fn public_job_listing_hides_closed_jobs() {
    let app = TestApp::new(Arc::new(RecordingSink::default()));
    let (owner, _) = register(&app, "admin", "Owner", "owner@example.com").await;
    let open = post_job(&app, &owner).await;
    let closed = post_job(&app, &owner).await;

    let (status, _) = app
        .send(json_request(
            "PUT",
            &format!("/api/admin/jobs/{closed}/status"),
            Some(&owner),
            json!({"isActive": false}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.send(get_request("/api/jobs", None)).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["_id"], open.as_str());
    assert_eq!(body["data"][0]["postedBy"]["email"], "owner@example.com");

    let (status, body) = app
        .send(get_request(&format!("/api/jobs/{closed}"), None))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Job is no longer active");

    let (status, _) = app.send(get_request("/api/jobs/not-a-uuid", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, mine) = app
        .send(get_request("/api/admin/jobs/my-jobs", Some(&owner)))
        .await;
    assert_eq!(mine["count"], 2);
}

#[tokio::test]
async fn multipart_job_with_logo() {
    let app = TestApp::new(Arc::new(RecordingSink::default()));
    let (owner, _) = register(&app, "admin", "Owner", "owner@example.com").await;

    let (status, body) = app
        .send(multipart_request(
            "/api/admin/jobs",
            &owner,
            &[
                ("companyName", "Acme"),
                ("jobTitle", "Rust Engineer"),
                ("role", "Backend"),
                ("location", "Remote"),
                ("salary", "100k"),
                ("jobType", "Part-time"),
                ("experience", "3 years"),
                ("description", "Build services"),
                ("skills", "Rust, SQL"),
            ],
            &[("companyLogo", "logo.png", b"\x89PNG")],
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["jobType"], "Part-time");
    assert_eq!(body["data"]["skills"], json!(["Rust", "SQL"]));
    assert!(
        body["data"]["companyLogo"]
            .as_str()
            .unwrap()
            .starts_with("/uploads/company_logos/")
    );
}

#[tokio::test]
async fn submit_without_resume_is_rejected() {
    let app = TestApp::new(Arc::new(RecordingSink::default()));
    let (owner, _) = register(&app, "admin", "Owner", "owner@example.com").await;
    let (user, _) = register(&app, "users", "Jane", "jane@example.com").await;
    let job_id = post_job(&app, &owner).await;

    let (status, body) = app
        .send(multipart_request(
            &format!("/api/applications/{job_id}"),
            &user,
            &[("coverLetter", "Hi")],
            &[],
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please upload your resume");
}

#[tokio::test]
async fn health_endpoint_reports_ok_without_database() {
    let app = TestApp::new(Arc::new(RecordingSink::default()));
    let (status, body) = app.send(get_request("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["healthy"], true);
}

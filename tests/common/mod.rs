//! Shared helpers for the integration tests.
//!
//! Every test gets its own router over a fresh in-memory store, so tests never
//! share state and need no database.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use coursehub::coursehub_config::{
    AppConfig, CookieConfig, CorsConfig, ExternalIdentityConfig, JwtConfig, ServerConfig,
};
use coursehub::coursehub_core::AppError;
use coursehub::coursehub_db::MemoryStore;
use coursehub::modules::auth::identity::{ExternalIdentity, IdentityVerifier};
use coursehub::router::init_router;
use coursehub::state::AppState;

pub const PASSWORD: &str = "password123";

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry: 3600,
        },
        cookie: CookieConfig::default(),
        cors: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        external: ExternalIdentityConfig::default(),
    }
}

pub fn test_state() -> AppState {
    AppState::new(Arc::new(MemoryStore::new()), test_config())
}

pub fn setup_test_app() -> Router {
    init_router(test_state())
}

/// Accepts credentials of the form `valid:<email>` and rejects everything else.
pub struct FakeIdentityVerifier;

#[async_trait]
impl IdentityVerifier for FakeIdentityVerifier {
    async fn verify(&self, credential: &str) -> Result<ExternalIdentity, AppError> {
        match credential.strip_prefix("valid:") {
            Some(email) => Ok(ExternalIdentity {
                email: email.to_string(),
                external_id: format!("ext-{}", email),
                name: None,
            }),
            None => Err(AppError::unauthorized("Invalid external credential")),
        }
    }
}

pub fn setup_test_app_with_external_identity() -> Router {
    init_router(test_state().with_identity_verifier(Arc::new(FakeIdentityVerifier)))
}

pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub cookie: String,
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Sends a request and returns status plus parsed JSON body.
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let response = send(app, method, uri, cookie, body).await;
    let status = response.status();
    (status, body_json(response).await)
}

/// The `name=value` pair of the first `Set-Cookie` header.
pub fn session_cookie(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response sets a cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

pub async fn register(app: &Router, email: &str, role: &str) -> i64 {
    let (status, body) = request(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "email": email, "password": PASSWORD, "role": role })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    body["id"].as_i64().unwrap()
}

pub async fn login(app: &Router, email: &str) -> String {
    let response = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": PASSWORD })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response)
}

pub async fn create_user(app: &Router, email: &str, role: &str) -> TestUser {
    let id = register(app, email, role).await;
    let cookie = login(app, email).await;
    TestUser {
        id,
        email: email.to_string(),
        cookie,
    }
}

pub async fn create_course(app: &Router, instructor: &TestUser, title: &str, category: &str) -> i64 {
    let (status, body) = request(
        app,
        "POST",
        "/api/courses",
        Some(&instructor.cookie),
        Some(json!({
            "title": title,
            "description": format!("All about {}", title),
            "category": category
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create course failed: {}", body);
    body["id"].as_i64().unwrap()
}

pub async fn create_session(app: &Router, instructor: &TestUser, course_id: i64, title: &str) -> i64 {
    let (status, body) = request(
        app,
        "POST",
        &format!("/api/courses/{}/sessions", course_id),
        Some(&instructor.cookie),
        Some(json!({
            "title": title,
            "videoLink": "https://videos.example.com/watch/1",
            "explanation": format!("{} explained", title)
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create session failed: {}", body);
    body["id"].as_i64().unwrap()
}

pub async fn enroll(app: &Router, student: &TestUser, course_id: i64) -> StatusCode {
    let (status, _) = request(
        app,
        "POST",
        "/api/enrollments",
        Some(&student.cookie),
        Some(json!({ "courseId": course_id })),
    )
    .await;
    status
}

mod common;

use axum::http::{StatusCode, header};
use serde_json::json;

use common::{
    PASSWORD, body_json, create_user, register, request, send, session_cookie, setup_test_app,
    setup_test_app_with_external_identity, test_config,
};
use coursehub::coursehub_auth::{Identity, issue_token};
use coursehub::coursehub_models::{Role, UserId};

#[tokio::test]
async fn test_register_returns_user_without_password() {
    let app = setup_test_app();

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "email": "Alice@Example.com", "password": PASSWORD, "role": "instructor" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["role"], "instructor");
    assert!(body["id"].is_i64());
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = setup_test_app();
    register(&app, "dup@example.com", "student").await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "email": "DUP@example.com", "password": PASSWORD, "role": "student" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already exists");
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let app = setup_test_app();

    let cases = [
        json!({ "email": "not-an-email", "password": PASSWORD, "role": "student" }),
        json!({ "email": "a@example.com", "password": "short", "role": "student" }),
        json!({ "email": "a@example.com", "password": PASSWORD, "role": "admin" }),
        json!({ "email": "a@example.com", "password": PASSWORD }),
    ];

    for case in cases {
        let (status, body) = request(&app, "POST", "/api/auth/register", None, Some(case)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_login_sets_http_only_cookie_and_returns_token() {
    let app = setup_test_app();
    register(&app, "bob@example.com", "student").await;

    let response = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "bob@example.com", "password": PASSWORD })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("authToken="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=3600"));

    let body = body_json(response).await;
    assert_eq!(body["message"], "Logged in successfully");
    assert_eq!(body["user"]["email"], "bob@example.com");
    assert_eq!(body["user"]["role"], "student");
    let token = body["token"].as_str().unwrap();
    assert_eq!(set_cookie.split(';').next().unwrap(), format!("authToken={}", token));
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let app = setup_test_app();
    register(&app, "carol@example.com", "student").await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "carol@example.com", "password": "wrongpassword" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_current_user_requires_cookie() {
    let app = setup_test_app();

    let (status, body) = request(&app, "GET", "/api/auth/user", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authentication required");
}

#[tokio::test]
async fn test_current_user_with_cookie() {
    let app = setup_test_app();
    let user = create_user(&app, "dave@example.com", "instructor").await;

    let (status, body) = request(&app, "GET", "/api/auth/user", Some(&user.cookie), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user.id);
    assert_eq!(body["email"], "dave@example.com");
    assert_eq!(body["role"], "instructor");
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = setup_test_app();

    let (status, _) = request(
        &app,
        "GET",
        "/api/auth/user",
        Some("authToken=not.a.token"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let app = setup_test_app();
    let user = create_user(&app, "erin@example.com", "student").await;

    let identity = Identity::new(UserId::new(user.id), Role::Student);
    let expired = issue_token(identity, -10, &test_config().jwt).unwrap();

    let (status, _) = request(
        &app,
        "GET",
        "/api/auth/user",
        Some(&format!("authToken={}", expired)),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_unauthorized() {
    let app = setup_test_app();
    let user = create_user(&app, "frank@example.com", "student").await;

    let mut other = test_config().jwt;
    other.secret = "some-other-secret".to_string();
    let identity = Identity::new(UserId::new(user.id), Role::Student);
    let forged = issue_token(identity, 3600, &other).unwrap();

    let (status, _) = request(
        &app,
        "GET",
        "/api/auth/user",
        Some(&format!("authToken={}", forged)),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = setup_test_app();
    let user = create_user(&app, "gina@example.com", "student").await;

    let response = send(&app, "POST", "/api/auth/logout", Some(&user.cookie), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("authToken=;"));
    assert!(set_cookie.contains("Max-Age=0"));

    let body = body_json(response).await;
    assert_eq!(body["message"], "Logged out successfully");
}

#[tokio::test]
async fn test_external_login_not_configured() {
    let app = setup_test_app();

    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/external",
        None,
        Some(json!({ "credential": "valid:x@example.com", "role": "student" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_external_login_provisions_then_reuses_user() {
    let app = setup_test_app_with_external_identity();

    let response = send(
        &app,
        "POST",
        "/api/auth/external",
        None,
        Some(json!({ "credential": "valid:Hana@Example.com", "role": "instructor" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);
    let first = body_json(response).await;
    assert_eq!(first["user"]["email"], "hana@example.com");
    assert_eq!(first["user"]["role"], "instructor");

    let (status, me) = request(&app, "GET", "/api/auth/user", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], first["user"]["id"]);

    // The role requested on later sign-ins is ignored.
    let (status, second) = request(
        &app,
        "POST",
        "/api/auth/external",
        None,
        Some(json!({ "credential": "valid:hana@example.com", "role": "student" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["user"]["id"], first["user"]["id"]);
    assert_eq!(second["user"]["role"], "instructor");
}

#[tokio::test]
async fn test_external_login_links_existing_local_account() {
    let app = setup_test_app_with_external_identity();
    let id = register(&app, "ivan@example.com", "student").await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/external",
        None,
        Some(json!({ "credential": "valid:ivan@example.com", "role": "instructor" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], id);
    assert_eq!(body["user"]["role"], "student");
}

#[tokio::test]
async fn test_external_login_rejected_credential() {
    let app = setup_test_app_with_external_identity();

    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/external",
        None,
        Some(json!({ "credential": "forged", "role": "student" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

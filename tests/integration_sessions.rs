mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{
    TestUser, create_course, create_session, create_user, enroll, request, setup_test_app,
};

async fn course_with_owner(app: &axum::Router) -> (TestUser, i64) {
    let instructor = create_user(app, "teach@example.com", "instructor").await;
    let course_id = create_course(app, &instructor, "Rust", "programming").await;
    (instructor, course_id)
}

#[tokio::test]
async fn test_create_session_appends_order() {
    let app = setup_test_app();
    let (instructor, course_id) = course_with_owner(&app).await;

    let (status, first) = request(
        &app,
        "POST",
        &format!("/api/courses/{}/sessions", course_id),
        Some(&instructor.cookie),
        Some(json!({
            "title": "Intro",
            "videoLink": "https://videos.example.com/intro",
            "explanation": "Getting started"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["order"], 1);
    assert_eq!(first["courseId"], course_id);
    assert_eq!(first["videoLink"], "https://videos.example.com/intro");

    let (_, explicit) = request(
        &app,
        "POST",
        &format!("/api/courses/{}/sessions", course_id),
        Some(&instructor.cookie),
        Some(json!({
            "title": "Later",
            "videoLink": "https://videos.example.com/later",
            "explanation": "Skips ahead",
            "order": 5
        })),
    )
    .await;
    assert_eq!(explicit["order"], 5);

    let (_, appended) = request(
        &app,
        "POST",
        &format!("/api/courses/{}/sessions", course_id),
        Some(&instructor.cookie),
        Some(json!({
            "title": "Last",
            "videoLink": "https://videos.example.com/last",
            "explanation": "Wrap up"
        })),
    )
    .await;
    assert_eq!(appended["order"], 6);
}

#[tokio::test]
async fn test_create_session_validation() {
    let app = setup_test_app();
    let (instructor, course_id) = course_with_owner(&app).await;

    let (status, _) = request(
        &app,
        "POST",
        &format!("/api/courses/{}/sessions", course_id),
        Some(&instructor.cookie),
        Some(json!({
            "title": "Intro",
            "videoLink": "not a url",
            "explanation": "Getting started"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(
        &app,
        "POST",
        &format!("/api/courses/{}/sessions", course_id),
        Some(&instructor.cookie),
        Some(json!({
            "title": "Intro",
            "videoLink": "https://videos.example.com/intro",
            "explanation": "Getting started",
            "order": 0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_session_requires_course_owner() {
    let app = setup_test_app();
    let (_, course_id) = course_with_owner(&app).await;
    let other = create_user(&app, "other@example.com", "instructor").await;
    let student = create_user(&app, "learn@example.com", "student").await;
    let body = json!({
        "title": "Intro",
        "videoLink": "https://videos.example.com/intro",
        "explanation": "Getting started"
    });

    let (status, _) = request(
        &app,
        "POST",
        &format!("/api/courses/{}/sessions", course_id),
        Some(&other.cookie),
        Some(body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = request(
        &app,
        "POST",
        &format!("/api/courses/{}/sessions", course_id),
        Some(&student.cookie),
        Some(body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = request(
        &app,
        "POST",
        "/api/courses/4242/sessions",
        Some(&other.cookie),
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_sessions_gated_by_enrollment() {
    let app = setup_test_app();
    let (instructor, course_id) = course_with_owner(&app).await;
    create_session(&app, &instructor, course_id, "Intro").await;
    create_session(&app, &instructor, course_id, "Ownership").await;
    let student = create_user(&app, "learn@example.com", "student").await;
    let uri = format!("/api/courses/{}/sessions", course_id);

    let (status, _) = request(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = request(&app, "GET", &uri, Some(&student.cookie), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You are not enrolled in this course");

    assert_eq!(enroll(&app, &student, course_id).await, StatusCode::CREATED);

    let (status, body) = request(&app, "GET", &uri, Some(&student.cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Intro", "Ownership"]);

    let (status, body) = request(&app, "GET", &uri, Some(&instructor.cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_sessions_other_instructor_forbidden() {
    let app = setup_test_app();
    let (instructor, course_id) = course_with_owner(&app).await;
    create_session(&app, &instructor, course_id, "Intro").await;
    let other = create_user(&app, "other@example.com", "instructor").await;

    let (status, _) = request(
        &app,
        "GET",
        &format!("/api/courses/{}/sessions", course_id),
        Some(&other.cookie),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_get_single_session() {
    let app = setup_test_app();
    let (instructor, course_id) = course_with_owner(&app).await;
    let session_id = create_session(&app, &instructor, course_id, "Intro").await;
    let other_course = create_course(&app, &instructor, "Go", "programming").await;
    let student = create_user(&app, "learn@example.com", "student").await;
    enroll(&app, &student, course_id).await;

    let (status, body) = request(
        &app,
        "GET",
        &format!("/api/courses/{}/sessions/{}", course_id, session_id),
        Some(&student.cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], session_id);
    assert_eq!(body["explanation"], "Intro explained");

    // A session addressed through a course it does not belong to.
    let (status, _) = request(
        &app,
        "GET",
        &format!("/api/courses/{}/sessions/{}", other_course, session_id),
        Some(&instructor.cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(
        &app,
        "GET",
        &format!("/api/courses/{}/sessions/777", course_id),
        Some(&instructor.cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_and_delete_session() {
    let app = setup_test_app();
    let (instructor, course_id) = course_with_owner(&app).await;
    let session_id = create_session(&app, &instructor, course_id, "Intro").await;
    let other = create_user(&app, "other@example.com", "instructor").await;
    let uri = format!("/api/courses/sessions/{}", session_id);

    let (status, _) = request(
        &app,
        "PUT",
        &uri,
        Some(&other.cookie),
        Some(json!({ "title": "Mine now" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = request(
        &app,
        "PUT",
        &uri,
        Some(&instructor.cookie),
        Some(json!({ "title": "Welcome", "order": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Welcome");
    assert_eq!(body["order"], 3);
    assert_eq!(body["explanation"], "Intro explained");

    let (status, _) = request(&app, "DELETE", &uri, Some(&other.cookie), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = request(&app, "DELETE", &uri, Some(&instructor.cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Session deleted successfully");

    let (status, _) = request(&app, "DELETE", &uri, Some(&instructor.cookie), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_session_after_highest_position_conflicts() {
    let app = setup_test_app();
    let (instructor, course_id) = course_with_owner(&app).await;
    let uri = format!("/api/courses/{}/sessions", course_id);

    let (status, body) = request(
        &app,
        "POST",
        &uri,
        Some(&instructor.cookie),
        Some(json!({
            "title": "Far away",
            "videoLink": "https://videos.example.com/far",
            "explanation": "At the very end",
            "order": i32::MAX
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["order"], i32::MAX);

    let (status, body) = request(
        &app,
        "POST",
        &uri,
        Some(&instructor.cookie),
        Some(json!({
            "title": "Appended",
            "videoLink": "https://videos.example.com/next",
            "explanation": "No room left"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("explicit order"));

    // An explicit order still works.
    let (status, body) = request(
        &app,
        "POST",
        &uri,
        Some(&instructor.cookie),
        Some(json!({
            "title": "Placed",
            "videoLink": "https://videos.example.com/placed",
            "explanation": "Slotted in",
            "order": 2
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["order"], 2);
}

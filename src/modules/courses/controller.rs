use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use tracing::instrument;

use coursehub_core::AppError;
use coursehub_models::{CourseId, MessageResponse, UserId};

use super::model::{
    Course, CourseWithSessions, CreateCourseDto, PublishedCoursesQuery, UpdateCourseDto,
};
use super::service::CourseService;
use crate::middleware::auth::{AuthUser, RequireInstructor};
use crate::modules::auth::model::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ParsedPath, ValidatedJson};

/// Create a course
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Only instructors can create courses", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    RequireInstructor(auth_user): RequireInstructor,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = CourseService::create_course(state.db.as_ref(), auth_user.0, dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// List published courses
#[utoipa::path(
    get,
    path = "/api/courses/published",
    params(PublishedCoursesQuery),
    responses(
        (status = 200, description = "Published courses", body = Vec<Course>)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn list_published_courses(
    State(state): State<AppState>,
    Query(query): Query<PublishedCoursesQuery>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::list_published(state.db.as_ref(), query.category).await?;
    Ok(Json(courses))
}

/// List an instructor's courses with their sessions
#[utoipa::path(
    get,
    path = "/api/courses/instructor/{instructor_id}",
    params(("instructor_id" = i64, Path, description = "Instructor user ID")),
    responses(
        (status = 200, description = "Courses with sessions", body = Vec<CourseWithSessions>),
        (status = 400, description = "Invalid instructor ID", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn list_instructor_courses(
    State(state): State<AppState>,
    ParsedPath(instructor_id): ParsedPath<UserId>,
) -> Result<Json<Vec<CourseWithSessions>>, AppError> {
    let courses = CourseService::list_by_instructor(state.db.as_ref(), instructor_id).await?;
    Ok(Json(courses))
}

/// Update a course
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the course owner", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn update_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ParsedPath(course_id): ParsedPath<CourseId>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<Course>, AppError> {
    let course =
        CourseService::update_course(state.db.as_ref(), auth_user.0, course_id, dto).await?;
    Ok(Json(course))
}

/// Delete a course and everything that belongs to it
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the course owner", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ParsedPath(course_id): ParsedPath<CourseId>,
) -> Result<Json<MessageResponse>, AppError> {
    CourseService::delete_course(state.db.as_ref(), auth_user.0, course_id).await?;
    Ok(Json(MessageResponse {
        message: "Course deleted successfully".to_string(),
    }))
}

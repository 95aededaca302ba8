use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use coursehub_core::AppError;
use coursehub_models::UserId;

use super::model::{CreateEnrollmentDto, EnrollmentResponse, EnrollmentWithCourse};
use super::service::EnrollmentService;
use crate::middleware::auth::{AuthUser, RequireStudent};
use crate::modules::auth::model::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ParsedPath, ValidatedJson};

/// Enroll in a course
#[utoipa::path(
    post,
    path = "/api/enrollments",
    request_body = CreateEnrollmentDto,
    responses(
        (status = 201, description = "Enrolled", body = EnrollmentResponse),
        (status = 400, description = "Invalid course ID", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Only students can enroll", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 409, description = "Already enrolled", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn enroll(
    State(state): State<AppState>,
    RequireStudent(auth_user): RequireStudent,
    ValidatedJson(dto): ValidatedJson<CreateEnrollmentDto>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), AppError> {
    let enrollment = EnrollmentService::enroll(state.db.as_ref(), auth_user.0, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(EnrollmentResponse {
            message: "Enrolled successfully".to_string(),
            enrollment,
        }),
    ))
}

/// List a student's enrollments with course details
#[utoipa::path(
    get,
    path = "/api/enrollments/student/{student_id}",
    params(("student_id" = i64, Path, description = "Student user ID")),
    responses(
        (status = 200, description = "Enrollments", body = Vec<EnrollmentWithCourse>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Another student's enrollments", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn list_student_enrollments(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ParsedPath(student_id): ParsedPath<UserId>,
) -> Result<Json<Vec<EnrollmentWithCourse>>, AppError> {
    let enrollments =
        EnrollmentService::list_for_student(state.db.as_ref(), auth_user.0, student_id).await?;
    Ok(Json(enrollments))
}

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use coursehub_core::AppError;
use coursehub_models::{SessionId, UserId};

use super::model::{CompletionResponse, CourseProgress, RateSessionDto, Rating};
use super::service::DashboardService;
use crate::middleware::auth::RequireStudent;
use crate::modules::auth::model::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ParsedPath, ValidatedJson};

/// Get a student's progress through their enrolled courses
#[utoipa::path(
    get,
    path = "/api/dashboard/student/{student_id}",
    params(("student_id" = i64, Path, description = "Student user ID")),
    responses(
        (status = 200, description = "Progress per enrolled course", body = Vec<CourseProgress>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not this student", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Dashboard"
)]
#[instrument(skip(state))]
pub async fn get_student_dashboard(
    State(state): State<AppState>,
    RequireStudent(auth_user): RequireStudent,
    ParsedPath(student_id): ParsedPath<UserId>,
) -> Result<Json<Vec<CourseProgress>>, AppError> {
    let progress = DashboardService::get_progress(state.db.as_ref(), auth_user.0, student_id).await?;
    Ok(Json(progress))
}

/// Mark a session as completed
///
/// Idempotent: completing a session twice returns the same record.
#[utoipa::path(
    post,
    path = "/api/dashboard/student/{student_id}/sessions/{session_id}/complete",
    params(
        ("student_id" = i64, Path, description = "Student user ID"),
        ("session_id" = i64, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session completed", body = CompletionResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not this student, or not enrolled", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Dashboard"
)]
#[instrument(skip(state))]
pub async fn complete_session(
    State(state): State<AppState>,
    RequireStudent(auth_user): RequireStudent,
    ParsedPath((student_id, session_id)): ParsedPath<(UserId, SessionId)>,
) -> Result<Json<CompletionResponse>, AppError> {
    let completed_session =
        DashboardService::complete_session(state.db.as_ref(), auth_user.0, student_id, session_id)
            .await?;
    Ok(Json(CompletionResponse {
        message: "Session marked as completed".to_string(),
        completed_session,
    }))
}

/// Rate a session from 1 to 5
#[utoipa::path(
    post,
    path = "/api/dashboard/sessions/{session_id}/rate",
    params(("session_id" = i64, Path, description = "Session ID")),
    request_body = RateSessionDto,
    responses(
        (status = 201, description = "Rating recorded", body = Rating),
        (status = 400, description = "Rating outside 1-5", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not a student, or not enrolled", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 409, description = "Already rated", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Dashboard"
)]
#[instrument(skip(state))]
pub async fn rate_session(
    State(state): State<AppState>,
    RequireStudent(auth_user): RequireStudent,
    ParsedPath(session_id): ParsedPath<SessionId>,
    ValidatedJson(dto): ValidatedJson<RateSessionDto>,
) -> Result<(StatusCode, Json<Rating>), AppError> {
    let rating =
        DashboardService::rate_session(state.db.as_ref(), auth_user.0, session_id, dto).await?;
    Ok((StatusCode::CREATED, Json(rating)))
}

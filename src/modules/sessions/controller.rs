use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use coursehub_core::AppError;
use coursehub_models::{CourseId, MessageResponse, SessionId};

use super::model::{CreateSessionDto, Session, UpdateSessionDto};
use super::service::SessionService;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::model::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ParsedPath, ValidatedJson};

/// Add a session to a course
///
/// Without an explicit `order` the session is appended after the last one.
#[utoipa::path(
    post,
    path = "/api/courses/{id}/sessions",
    params(("id" = i64, Path, description = "Course ID")),
    request_body = CreateSessionDto,
    responses(
        (status = 201, description = "Session created", body = Session),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the course owner", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Sessions"
)]
#[instrument(skip(state, dto))]
pub async fn create_session(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ParsedPath(course_id): ParsedPath<CourseId>,
    ValidatedJson(dto): ValidatedJson<CreateSessionDto>,
) -> Result<(StatusCode, Json<Session>), AppError> {
    let session =
        SessionService::create_session(state.db.as_ref(), auth_user.0, course_id, dto).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// List a course's sessions in order
#[utoipa::path(
    get,
    path = "/api/courses/{id}/sessions",
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Sessions ordered by position", body = Vec<Session>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Neither the owner nor enrolled", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Sessions"
)]
#[instrument(skip(state))]
pub async fn list_sessions(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ParsedPath(course_id): ParsedPath<CourseId>,
) -> Result<Json<Vec<Session>>, AppError> {
    let sessions = SessionService::list_sessions(state.db.as_ref(), auth_user.0, course_id).await?;
    Ok(Json(sessions))
}

/// Get one session of a course
#[utoipa::path(
    get,
    path = "/api/courses/{id}/sessions/{session_id}",
    params(
        ("id" = i64, Path, description = "Course ID"),
        ("session_id" = i64, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session", body = Session),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Neither the owner nor enrolled", body = ErrorResponse),
        (status = 404, description = "Course or session not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Sessions"
)]
#[instrument(skip(state))]
pub async fn get_session(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ParsedPath((course_id, session_id)): ParsedPath<(CourseId, SessionId)>,
) -> Result<Json<Session>, AppError> {
    let session =
        SessionService::get_session(state.db.as_ref(), auth_user.0, course_id, session_id).await?;
    Ok(Json(session))
}

/// Update a session
#[utoipa::path(
    put,
    path = "/api/courses/sessions/{session_id}",
    params(("session_id" = i64, Path, description = "Session ID")),
    request_body = UpdateSessionDto,
    responses(
        (status = 200, description = "Session updated", body = Session),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the course owner", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Sessions"
)]
#[instrument(skip(state, dto))]
pub async fn update_session(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ParsedPath(session_id): ParsedPath<SessionId>,
    ValidatedJson(dto): ValidatedJson<UpdateSessionDto>,
) -> Result<Json<Session>, AppError> {
    let session =
        SessionService::update_session(state.db.as_ref(), auth_user.0, session_id, dto).await?;
    Ok(Json(session))
}

/// Delete a session
#[utoipa::path(
    delete,
    path = "/api/courses/sessions/{session_id}",
    params(("session_id" = i64, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the course owner", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Sessions"
)]
#[instrument(skip(state))]
pub async fn delete_session(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ParsedPath(session_id): ParsedPath<SessionId>,
) -> Result<Json<MessageResponse>, AppError> {
    SessionService::delete_session(state.db.as_ref(), auth_user.0, session_id).await?;
    Ok(Json(MessageResponse {
        message: "Session deleted successfully".to_string(),
    }))
}

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use tracing::instrument;

use coursehub_config::AppConfig;
use coursehub_core::AppError;

use super::model::{
    ErrorResponse, ExternalLoginRequest, LoginRequest, LoginResponse, MessageResponse,
    RegisterRequest, User,
};
use super::service::AuthService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

fn session_cookie(config: &AppConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.cookie.name.clone(), token))
        .http_only(true)
        .secure(config.cookie.secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::seconds(
            config.jwt.access_token_expiry,
        ))
        .build()
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = User),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Email already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = AuthService::register_user(state.db.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Log in with email and password
///
/// Sets the HTTP-only auth cookie and also returns the token in the body.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let response = AuthService::login_user(state.db.as_ref(), dto, &state.config.jwt).await?;
    let jar = jar.add(session_cookie(&state.config, response.token.clone()));
    Ok((jar, Json(response)))
}

/// Log in with a credential from an external identity provider
#[utoipa::path(
    post,
    path = "/api/auth/external",
    request_body = ExternalLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error or external sign-in not configured", body = ErrorResponse),
        (status = 401, description = "Credential rejected", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, dto))]
pub async fn external_login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<ExternalLoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let response = AuthService::external_login(
        state.db.as_ref(),
        state.identity_verifier.as_deref(),
        dto,
        &state.config.jwt,
    )
    .await?;
    let jar = jar.add(session_cookie(&state.config, response.token.clone()));
    Ok((jar, Json(response)))
}

/// Log out by clearing the auth cookie
///
/// The token itself stays valid until it expires.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar))]
pub async fn logout_user(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.remove(Cookie::build(state.config.cookie.name.clone()).path("/"));
    (
        jar,
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// Get the currently authenticated user
#[utoipa::path(
    get,
    path = "/api/auth/user",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn get_current_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<User>, AppError> {
    let user = AuthService::get_current_user(state.db.as_ref(), auth_user.0).await?;
    Ok(Json(user))
}

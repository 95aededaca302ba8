use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;

use coursehub_auth::{Identity, verify_identity};
use coursehub_core::AppError;
use coursehub_models::{Role, UserId};

use crate::state::AppState;

/// Extractor that verifies the auth cookie and provides the caller's identity.
///
/// Never touches the datastore.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    pub fn id(&self) -> UserId {
        self.0.id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(&state.config.cookie.name)
            .map(|cookie| cookie.value())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

        let identity = verify_identity(token, &state.config.jwt)?;

        Ok(AuthUser(identity))
    }
}

/// Generates an extractor that resolves the caller and requires one role.
#[macro_export]
macro_rules! require_role {
    ($name:ident, $role:expr) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = coursehub_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user =
                    $crate::middleware::auth::AuthUser::from_request_parts(parts, state).await?;

                $crate::middleware::guard::role_is(auth_user.identity(), $role)?;

                Ok($name(auth_user))
            }
        }
    };
}

require_role!(RequireInstructor, Role::Instructor);
require_role!(RequireStudent, Role::Student);

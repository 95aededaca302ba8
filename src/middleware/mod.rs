//! Identity resolution and authorization.
//!
//! - [`auth`]: the [`auth::AuthUser`] extractor that resolves the caller from
//!   the auth cookie, plus role-gated extractors
//! - [`guard`]: ownership and enrollment predicates over already-fetched state
//!
//! # Flow
//!
//! 1. The client sends the `authToken` cookie set at login
//! 2. `AuthUser` verifies it and yields an [`Identity`](coursehub_auth::Identity);
//!    a missing or invalid token is a 401 and the handler never runs
//! 3. Role extractors (`RequireInstructor`, `RequireStudent`) reject a wrong
//!    role with 403 before the body is read
//! 4. Services fetch what they need and apply [`guard`] predicates
//!
//! ```ignore
//! async fn create_course(
//!     RequireInstructor(auth_user): RequireInstructor,
//!     ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
//! ) -> Result<impl IntoResponse, AppError> {
//!     // only instructors get here
//! }
//! ```

pub mod auth;
pub mod guard;

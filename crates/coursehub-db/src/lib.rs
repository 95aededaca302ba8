//! # Coursehub DB
//!
//! The [`Datastore`] seam between request handlers and storage.
//!
//! - [`PgStore`]: PostgreSQL via SQLx, used in production and by the CLI
//! - [`MemoryStore`]: in-process store for tests (`test-utils` feature)
//!
//! Uniqueness of users (email), enrollments (student, course), completions and
//! ratings (student, session) is enforced by the store itself. A violation is
//! reported as a conflict (409), so handler pre-checks are only early exits.
//! Deleting a course or a session cascades to everything that references it.
//!
//! # Example
//!
//! ```ignore
//! use coursehub_db::{PgStore, init_db_pool};
//!
//! let pool = init_db_pool(&database_url).await?;
//! let store = PgStore::new(pool);
//! store.run_migrations().await?;
//! ```

use async_trait::async_trait;

use coursehub_core::AppError;
use coursehub_models::{
    CompletedSession, Course, CourseChanges, CourseId, Enrollment, NewCompletedSession, NewCourse,
    NewRating, NewSession, NewUser, Rating, Session, SessionChanges, SessionId, User,
    UserCredentials, UserId,
};

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryStore;
pub use postgres::{PgStore, init_db_pool};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Storage operations needed by the API.
///
/// `find_*` return `Ok(None)` when nothing matches; `update_*` return
/// `Ok(None)` and `delete_*` return `Ok(false)` when the row does not exist.
#[async_trait]
pub trait Datastore: Send + Sync {
    // --- Users ---
    async fn create_user(&self, user: NewUser) -> Result<User, AppError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserCredentials>, AppError>;
    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, AppError>;

    // --- Courses ---
    async fn create_course(&self, course: NewCourse) -> Result<Course, AppError>;
    async fn find_course(&self, id: CourseId) -> Result<Option<Course>, AppError>;
    /// All courses, newest first, optionally restricted to one category.
    async fn list_courses(&self, category: Option<&str>) -> Result<Vec<Course>, AppError>;
    async fn list_courses_by_instructor(
        &self,
        instructor_id: UserId,
    ) -> Result<Vec<Course>, AppError>;
    async fn update_course(
        &self,
        id: CourseId,
        changes: CourseChanges,
    ) -> Result<Option<Course>, AppError>;
    async fn delete_course(&self, id: CourseId) -> Result<bool, AppError>;

    // --- Course sessions ---
    async fn create_session(&self, session: NewSession) -> Result<Session, AppError>;
    async fn find_session(&self, id: SessionId) -> Result<Option<Session>, AppError>;
    /// Sessions of a course ordered by `order`, then id.
    async fn list_sessions(&self, course_id: CourseId) -> Result<Vec<Session>, AppError>;
    async fn update_session(
        &self,
        id: SessionId,
        changes: SessionChanges,
    ) -> Result<Option<Session>, AppError>;
    async fn delete_session(&self, id: SessionId) -> Result<bool, AppError>;

    // --- Enrollments ---
    async fn create_enrollment(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<Enrollment, AppError>;
    async fn find_enrollment(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<Option<Enrollment>, AppError>;
    async fn list_enrollments_by_student(
        &self,
        student_id: UserId,
    ) -> Result<Vec<Enrollment>, AppError>;

    // --- Progress ---
    async fn create_completed_session(
        &self,
        completion: NewCompletedSession,
    ) -> Result<CompletedSession, AppError>;
    async fn find_completed_session(
        &self,
        student_id: UserId,
        session_id: SessionId,
    ) -> Result<Option<CompletedSession>, AppError>;
    async fn list_completed_sessions(
        &self,
        student_id: UserId,
    ) -> Result<Vec<CompletedSession>, AppError>;
    async fn create_rating(&self, rating: NewRating) -> Result<Rating, AppError>;
    async fn find_rating(
        &self,
        student_id: UserId,
        session_id: SessionId,
    ) -> Result<Option<Rating>, AppError>;
}

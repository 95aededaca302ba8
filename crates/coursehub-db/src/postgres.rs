//! PostgreSQL implementation of [`Datastore`].

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::instrument;

use coursehub_core::AppError;
use coursehub_models::{
    CompletedSession, Course, CourseChanges, CourseId, Enrollment, NewCompletedSession, NewCourse,
    NewRating, NewSession, NewUser, Rating, Session, SessionChanges, SessionId, User,
    UserCredentials, UserId,
};

use crate::Datastore;

const USER_COLUMNS: &str = "id, email, role, created_at";
const COURSE_COLUMNS: &str =
    "id, instructor_id, title, description, category, created_at, updated_at";
const SESSION_COLUMNS: &str =
    "id, course_id, position, title, video_link, explanation, created_at, updated_at";
const ENROLLMENT_COLUMNS: &str = "id, student_id, course_id, created_at";
const COMPLETION_COLUMNS: &str = "id, student_id, session_id, enrollment_id, completed_at";
const RATING_COLUMNS: &str = "id, student_id, session_id, enrollment_id, rating, created_at";

/// Connects a PostgreSQL pool to `database_url`.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<(), AppError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(AppError::database)?;
        Ok(())
    }
}

/// Maps constraint violations on insert to client errors.
///
/// A unique violation becomes a conflict carrying `conflict_message`; a
/// foreign-key violation means the referenced row vanished concurrently.
fn map_write_error(e: sqlx::Error, conflict_message: &'static str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::conflict(anyhow::anyhow!(conflict_message));
        }
        if db_err.is_foreign_key_violation() {
            return AppError::not_found(anyhow::anyhow!("Referenced resource not found"));
        }
        if db_err.is_check_violation() {
            return AppError::bad_request(anyhow::anyhow!("Value out of range"));
        }
    }
    AppError::database(e)
}

#[async_trait]
impl Datastore for PgStore {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password_hash, role) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "A user with this email already exists"))
    }

    #[instrument(skip(self))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserCredentials>, AppError> {
        let user = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, email, role, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    #[instrument(skip(self, course), fields(instructor_id = %course.instructor_id))]
    async fn create_course(&self, course: NewCourse) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(&format!(
            r#"INSERT INTO courses (instructor_id, title, description, category)
               VALUES ($1, $2, $3, $4)
               RETURNING {COURSE_COLUMNS}"#
        ))
        .bind(course.instructor_id)
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.category)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Course already exists"))
    }

    #[instrument(skip(self))]
    async fn find_course(&self, id: CourseId) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(course)
    }

    #[instrument(skip(self))]
    async fn list_courses(&self, category: Option<&str>) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            r#"SELECT {COURSE_COLUMNS} FROM courses
               WHERE ($1::TEXT IS NULL OR category = $1)
               ORDER BY created_at DESC, id DESC"#
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(courses)
    }

    #[instrument(skip(self))]
    async fn list_courses_by_instructor(
        &self,
        instructor_id: UserId,
    ) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE instructor_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(instructor_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(courses)
    }

    #[instrument(skip(self, changes))]
    async fn update_course(
        &self,
        id: CourseId,
        changes: CourseChanges,
    ) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            r#"UPDATE courses
               SET title = COALESCE($2, title),
                   description = COALESCE($3, description),
                   category = COALESCE($4, category),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {COURSE_COLUMNS}"#
        ))
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.category)
        .fetch_optional(&self.pool)
        .await?;
        Ok(course)
    }

    #[instrument(skip(self))]
    async fn delete_course(&self, id: CourseId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, session), fields(course_id = %session.course_id))]
    async fn create_session(&self, session: NewSession) -> Result<Session, AppError> {
        sqlx::query_as::<_, Session>(&format!(
            r#"INSERT INTO sessions (course_id, position, title, video_link, explanation)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {SESSION_COLUMNS}"#
        ))
        .bind(session.course_id)
        .bind(session.order)
        .bind(&session.title)
        .bind(&session.video_link)
        .bind(&session.explanation)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Session already exists"))
    }

    #[instrument(skip(self))]
    async fn find_session(&self, id: SessionId) -> Result<Option<Session>, AppError> {
        let session = sqlx::query_as::<_, Session>(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }

    #[instrument(skip(self))]
    async fn list_sessions(&self, course_id: CourseId) -> Result<Vec<Session>, AppError> {
        let sessions = sqlx::query_as::<_, Session>(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE course_id = $1 ORDER BY position ASC, id ASC"
        ))
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(sessions)
    }

    #[instrument(skip(self, changes))]
    async fn update_session(
        &self,
        id: SessionId,
        changes: SessionChanges,
    ) -> Result<Option<Session>, AppError> {
        let session = sqlx::query_as::<_, Session>(&format!(
            r#"UPDATE sessions
               SET title = COALESCE($2, title),
                   video_link = COALESCE($3, video_link),
                   explanation = COALESCE($4, explanation),
                   position = COALESCE($5, position),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {SESSION_COLUMNS}"#
        ))
        .bind(id)
        .bind(changes.title)
        .bind(changes.video_link)
        .bind(changes.explanation)
        .bind(changes.order)
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }

    #[instrument(skip(self))]
    async fn delete_session(&self, id: SessionId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn create_enrollment(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<Enrollment, AppError> {
        sqlx::query_as::<_, Enrollment>(&format!(
            "INSERT INTO enrollments (student_id, course_id) VALUES ($1, $2) RETURNING {ENROLLMENT_COLUMNS}"
        ))
        .bind(student_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Already enrolled in this course"))
    }

    #[instrument(skip(self))]
    async fn find_enrollment(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<Option<Enrollment>, AppError> {
        let enrollment = sqlx::query_as::<_, Enrollment>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE student_id = $1 AND course_id = $2"
        ))
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(enrollment)
    }

    #[instrument(skip(self))]
    async fn list_enrollments_by_student(
        &self,
        student_id: UserId,
    ) -> Result<Vec<Enrollment>, AppError> {
        let enrollments = sqlx::query_as::<_, Enrollment>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE student_id = $1 ORDER BY created_at ASC, id ASC"
        ))
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(enrollments)
    }

    #[instrument(skip(self, completion), fields(student_id = %completion.student_id, session_id = %completion.session_id))]
    async fn create_completed_session(
        &self,
        completion: NewCompletedSession,
    ) -> Result<CompletedSession, AppError> {
        sqlx::query_as::<_, CompletedSession>(&format!(
            r#"INSERT INTO completed_sessions (student_id, session_id, enrollment_id)
               VALUES ($1, $2, $3)
               RETURNING {COMPLETION_COLUMNS}"#
        ))
        .bind(completion.student_id)
        .bind(completion.session_id)
        .bind(completion.enrollment_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Session already completed"))
    }

    #[instrument(skip(self))]
    async fn find_completed_session(
        &self,
        student_id: UserId,
        session_id: SessionId,
    ) -> Result<Option<CompletedSession>, AppError> {
        let completion = sqlx::query_as::<_, CompletedSession>(&format!(
            "SELECT {COMPLETION_COLUMNS} FROM completed_sessions WHERE student_id = $1 AND session_id = $2"
        ))
        .bind(student_id)
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(completion)
    }

    #[instrument(skip(self))]
    async fn list_completed_sessions(
        &self,
        student_id: UserId,
    ) -> Result<Vec<CompletedSession>, AppError> {
        let completions = sqlx::query_as::<_, CompletedSession>(&format!(
            "SELECT {COMPLETION_COLUMNS} FROM completed_sessions WHERE student_id = $1 ORDER BY id ASC"
        ))
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(completions)
    }

    #[instrument(skip(self, rating), fields(student_id = %rating.student_id, session_id = %rating.session_id))]
    async fn create_rating(&self, rating: NewRating) -> Result<Rating, AppError> {
        sqlx::query_as::<_, Rating>(&format!(
            r#"INSERT INTO ratings (student_id, session_id, enrollment_id, rating)
               VALUES ($1, $2, $3, $4)
               RETURNING {RATING_COLUMNS}"#
        ))
        .bind(rating.student_id)
        .bind(rating.session_id)
        .bind(rating.enrollment_id)
        .bind(rating.rating)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "You have already rated this session"))
    }

    #[instrument(skip(self))]
    async fn find_rating(
        &self,
        student_id: UserId,
        session_id: SessionId,
    ) -> Result<Option<Rating>, AppError> {
        let rating = sqlx::query_as::<_, Rating>(&format!(
            "SELECT {RATING_COLUMNS} FROM ratings WHERE student_id = $1 AND session_id = $2"
        ))
        .bind(student_id)
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(rating)
    }
}

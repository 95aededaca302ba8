use tracing::{info, instrument};

use coursehub_auth::Identity;
use coursehub_core::AppError;
use coursehub_db::Datastore;
use coursehub_models::{Course, CourseId, Role, SessionId};

use super::model::{CreateSessionDto, NewSession, Session, UpdateSessionDto, next_order};
use crate::middleware::guard::{can_view_content, owns_course};
use crate::modules::courses::service::CourseService;

fn session_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Session not found"))
}

pub struct SessionService;

impl SessionService {
    /// Fetches a session or fails with 404.
    pub async fn find_session(
        db: &dyn Datastore,
        session_id: SessionId,
    ) -> Result<Session, AppError> {
        db.find_session(session_id)
            .await?
            .ok_or_else(session_not_found)
    }

    /// Applies the content-visibility guard, looking up the caller's
    /// enrollment only when the caller is a student.
    async fn authorize_view(
        db: &dyn Datastore,
        identity: &Identity,
        course: &Course,
    ) -> Result<(), AppError> {
        let enrollment = match identity.role {
            Role::Student => db.find_enrollment(identity.id, course.id).await?,
            Role::Instructor => None,
        };
        can_view_content(identity, course, enrollment.as_ref())
    }

    /// Fetches a session and its parent course and checks the caller owns the course.
    async fn find_owned_session(
        db: &dyn Datastore,
        identity: &Identity,
        session_id: SessionId,
    ) -> Result<Session, AppError> {
        let session = Self::find_session(db, session_id).await?;
        let course = CourseService::find_course(db, session.course_id).await?;
        owns_course(identity, &course)?;
        Ok(session)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_session(
        db: &dyn Datastore,
        identity: Identity,
        course_id: CourseId,
        dto: CreateSessionDto,
    ) -> Result<Session, AppError> {
        let course = CourseService::find_course(db, course_id).await?;
        owns_course(&identity, &course)?;

        let order = match dto.order {
            Some(order) => order,
            None => next_order(&db.list_sessions(course_id).await?).ok_or_else(|| {
                AppError::conflict(anyhow::anyhow!(
                    "No position left after the last session; provide an explicit order"
                ))
            })?,
        };

        let session = db
            .create_session(NewSession {
                course_id,
                order,
                title: dto.title,
                video_link: dto.video_link,
                explanation: dto.explanation,
            })
            .await?;

        info!(session_id = %session.id, order = session.order, "Session created");
        Ok(session)
    }

    #[instrument(skip(db))]
    pub async fn list_sessions(
        db: &dyn Datastore,
        identity: Identity,
        course_id: CourseId,
    ) -> Result<Vec<Session>, AppError> {
        let course = CourseService::find_course(db, course_id).await?;
        Self::authorize_view(db, &identity, &course).await?;
        db.list_sessions(course_id).await
    }

    #[instrument(skip(db))]
    pub async fn get_session(
        db: &dyn Datastore,
        identity: Identity,
        course_id: CourseId,
        session_id: SessionId,
    ) -> Result<Session, AppError> {
        let course = CourseService::find_course(db, course_id).await?;
        let session = Self::find_session(db, session_id).await?;
        if session.course_id != course_id {
            return Err(session_not_found());
        }
        Self::authorize_view(db, &identity, &course).await?;
        Ok(session)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_session(
        db: &dyn Datastore,
        identity: Identity,
        session_id: SessionId,
        dto: UpdateSessionDto,
    ) -> Result<Session, AppError> {
        Self::find_owned_session(db, &identity, session_id).await?;

        db.update_session(session_id, dto.into())
            .await?
            .ok_or_else(session_not_found)
    }

    #[instrument(skip(db))]
    pub async fn delete_session(
        db: &dyn Datastore,
        identity: Identity,
        session_id: SessionId,
    ) -> Result<(), AppError> {
        Self::find_owned_session(db, &identity, session_id).await?;

        if !db.delete_session(session_id).await? {
            return Err(session_not_found());
        }

        info!(session_id = %session_id, "Session deleted");
        Ok(())
    }
}

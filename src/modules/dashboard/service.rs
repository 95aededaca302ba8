use tracing::{info, instrument, warn};

use coursehub_auth::Identity;
use coursehub_core::AppError;
use coursehub_core::errors::ErrorKind;
use coursehub_db::Datastore;
use coursehub_models::{Role, SessionId, UserId};

use super::model::{
    CompletedSession, CourseProgress, NewCompletedSession, NewRating, RateSessionDto, Rating,
};
use crate::metrics::{track_session_completed, track_session_rated};
use crate::middleware::guard::{is_enrolled, is_self, role_is};
use crate::modules::sessions::service::SessionService;

pub struct DashboardService;

impl DashboardService {
    /// Progress of `student_id` through every course they are enrolled in.
    ///
    /// Only the student themselves may read it; the check happens before any read.
    #[instrument(skip(db))]
    pub async fn get_progress(
        db: &dyn Datastore,
        identity: Identity,
        student_id: UserId,
    ) -> Result<Vec<CourseProgress>, AppError> {
        role_is(&identity, Role::Student)?;
        is_self(&identity, student_id)?;

        let enrollments = db.list_enrollments_by_student(student_id).await?;
        let completions = db.list_completed_sessions(student_id).await?;

        let mut progress = Vec::with_capacity(enrollments.len());
        for enrollment in enrollments {
            let Some(course) = db.find_course(enrollment.course_id).await? else {
                warn!(enrollment_id = %enrollment.id, "Enrollment refers to a missing course");
                continue;
            };
            let sessions = db.list_sessions(course.id).await?;
            progress.push(CourseProgress::build(&course, &sessions, &completions));
        }

        Ok(progress)
    }

    /// Marks a session completed. Completing it again returns the existing record.
    #[instrument(skip(db))]
    pub async fn complete_session(
        db: &dyn Datastore,
        identity: Identity,
        student_id: UserId,
        session_id: SessionId,
    ) -> Result<CompletedSession, AppError> {
        role_is(&identity, Role::Student)?;
        is_self(&identity, student_id)?;

        let session = SessionService::find_session(db, session_id).await?;
        let enrollment = is_enrolled(db.find_enrollment(student_id, session.course_id).await?)?;

        if let Some(existing) = db.find_completed_session(student_id, session_id).await? {
            track_session_completed(false);
            return Ok(existing);
        }

        let completion = NewCompletedSession {
            student_id,
            session_id,
            enrollment_id: enrollment.id,
        };

        match db.create_completed_session(completion).await {
            Ok(completed) => {
                track_session_completed(true);
                info!(session_id = %session_id, "Session completed");
                Ok(completed)
            }
            // Lost a race with a concurrent completion of the same session.
            Err(e) if e.kind() == ErrorKind::Conflict => {
                track_session_completed(false);
                db.find_completed_session(student_id, session_id)
                    .await?
                    .ok_or_else(|| AppError::internal_error("Completion vanished after conflict"))
            }
            Err(e) => Err(e),
        }
    }

    /// Rates a session once. A second rating by the same student is a conflict.
    #[instrument(skip(db))]
    pub async fn rate_session(
        db: &dyn Datastore,
        identity: Identity,
        session_id: SessionId,
        dto: RateSessionDto,
    ) -> Result<Rating, AppError> {
        let session = SessionService::find_session(db, session_id).await?;
        let enrollment = is_enrolled(db.find_enrollment(identity.id, session.course_id).await?)?;

        if db.find_rating(identity.id, session_id).await?.is_some() {
            return Err(AppError::conflict(anyhow::anyhow!(
                "You have already rated this session"
            )));
        }

        let rating = db
            .create_rating(NewRating {
                student_id: identity.id,
                session_id,
                enrollment_id: enrollment.id,
                rating: dto.rating,
            })
            .await?;

        track_session_rated(rating.rating);
        Ok(rating)
    }
}

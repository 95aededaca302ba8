//! Session completion, ratings, and the per-course progress view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::courses::Course;
use crate::ids::{CompletedSessionId, CourseId, EnrollmentId, RatingId, SessionId, UserId};
use crate::sessions::Session;

/// Marks a session as completed by a student. Unique per (student, session).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletedSession {
    pub id: CompletedSessionId,
    pub student_id: UserId,
    pub session_id: SessionId,
    pub enrollment_id: EnrollmentId,
    pub completed_at: DateTime<Utc>,
}

/// Datastore input for a completion.
#[derive(Debug, Clone)]
pub struct NewCompletedSession {
    pub student_id: UserId,
    pub session_id: SessionId,
    pub enrollment_id: EnrollmentId,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResponse {
    pub message: String,
    pub completed_session: CompletedSession,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: RatingId,
    pub student_id: UserId,
    pub session_id: SessionId,
    pub enrollment_id: EnrollmentId,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RateSessionDto {
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i32,
}

/// Datastore input for a rating.
#[derive(Debug, Clone)]
pub struct NewRating {
    pub student_id: UserId,
    pub session_id: SessionId,
    pub enrollment_id: EnrollmentId,
    pub rating: i32,
}

/// A student's progress through one enrolled course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    pub course_id: CourseId,
    pub title: String,
    pub total_sessions: usize,
    pub completed_session_ids: Vec<SessionId>,
    pub completed_count: usize,
    /// `"completed/total"`, e.g. `"1/3"`.
    pub progress: String,
}

impl CourseProgress {
    /// Builds the progress view for `course`.
    ///
    /// `completions` may contain records for other courses; only completions of
    /// sessions in `sessions` are counted.
    pub fn build(course: &Course, sessions: &[Session], completions: &[CompletedSession]) -> Self {
        let mut completed_session_ids: Vec<SessionId> = completions
            .iter()
            .map(|c| c.session_id)
            .filter(|id| sessions.iter().any(|s| s.id == *id))
            .collect();
        completed_session_ids.sort();
        completed_session_ids.dedup();

        let total_sessions = sessions.len();
        let completed_count = completed_session_ids.len();

        Self {
            course_id: course.id,
            title: course.title.clone(),
            total_sessions,
            completed_session_ids,
            completed_count,
            progress: format!("{}/{}", completed_count, total_sessions),
        }
    }
}

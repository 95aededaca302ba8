//! Course session models.
//!
//! A session here is a unit of course content (a video plus explanation). It
//! has nothing to do with the authenticated session carried by the auth token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{CourseId, SessionId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    pub course_id: CourseId,
    #[sqlx(rename = "position")]
    pub order: i32,
    pub title: String,
    pub video_link: String,
    pub explanation: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionDto {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    #[validate(url(message = "videoLink must be a valid URL"))]
    pub video_link: String,
    #[validate(length(min = 1, message = "explanation is required"))]
    pub explanation: String,
    /// Position within the course. Appended after the last session when absent.
    #[validate(range(min = 1, message = "order must be positive"))]
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionDto {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(url(message = "videoLink must be a valid URL"))]
    pub video_link: Option<String>,
    #[validate(length(min = 1, message = "explanation must not be empty"))]
    pub explanation: Option<String>,
    #[validate(range(min = 1, message = "order must be positive"))]
    pub order: Option<i32>,
}

/// Datastore input for a new session.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub course_id: CourseId,
    pub order: i32,
    pub title: String,
    pub video_link: String,
    pub explanation: String,
}

/// Datastore input for a session update.
#[derive(Debug, Clone, Default)]
pub struct SessionChanges {
    pub title: Option<String>,
    pub video_link: Option<String>,
    pub explanation: Option<String>,
    pub order: Option<i32>,
}

impl From<UpdateSessionDto> for SessionChanges {
    fn from(dto: UpdateSessionDto) -> Self {
        Self {
            title: dto.title,
            video_link: dto.video_link,
            explanation: dto.explanation,
            order: dto.order,
        }
    }
}

impl SessionChanges {
    pub fn apply(self, session: &mut Session) {
        if let Some(title) = self.title {
            session.title = title;
        }
        if let Some(video_link) = self.video_link {
            session.video_link = video_link;
        }
        if let Some(explanation) = self.explanation {
            session.explanation = explanation;
        }
        if let Some(order) = self.order {
            session.order = order;
        }
    }
}

/// Position for a session appended after `existing`.
///
/// `None` when the highest existing order is already `i32::MAX`.
pub fn next_order(existing: &[Session]) -> Option<i32> {
    existing.iter().map(|s| s.order).max().unwrap_or(0).checked_add(1)
}

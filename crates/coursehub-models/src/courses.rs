//! Course data models and DTOs.
//!
//! A course belongs to exactly one instructor, who alone may change or delete it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::{CourseId, UserId};
use crate::sessions::Session;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub instructor_id: UserId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A course listed together with all of its sessions.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseWithSessions {
    #[serde(flatten)]
    pub course: Course,
    pub sessions: Vec<Session>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(length(min = 1, max = 100, message = "category must be 1-100 characters"))]
    pub category: String,
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100, message = "category must be 1-100 characters"))]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PublishedCoursesQuery {
    /// Only return courses in this category.
    pub category: Option<String>,
}

/// Datastore input for a new course.
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub instructor_id: UserId,
    pub title: String,
    pub description: String,
    pub category: String,
}

impl NewCourse {
    pub fn from_dto(instructor_id: UserId, dto: CreateCourseDto) -> Self {
        Self {
            instructor_id,
            title: dto.title,
            description: dto.description,
            category: dto.category,
        }
    }
}

/// Datastore input for a course update.
#[derive(Debug, Clone, Default)]
pub struct CourseChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl From<UpdateCourseDto> for CourseChanges {
    fn from(dto: UpdateCourseDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            category: dto.category,
        }
    }
}

impl CourseChanges {
    pub fn apply(self, course: &mut Course) {
        if let Some(title) = self.title {
            course.title = title;
        }
        if let Some(description) = self.description {
            course.description = description;
        }
        if let Some(category) = self.category {
            course.category = category;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_course() -> Course {
        Course {
            id: CourseId::new(1),
            instructor_id: UserId::new(10),
            title: "Rust 101".to_string(),
            description: "Ownership and borrowing".to_string(),
            category: "programming".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_changes_apply_only_present_fields() {
        let mut course = sample_course();
        CourseChanges {
            title: Some("Rust 201".to_string()),
            ..Default::default()
        }
        .apply(&mut course);

        assert_eq!(course.title, "Rust 201");
        assert_eq!(course.description, "Ownership and borrowing");
        assert_eq!(course.category, "programming");
    }

    #[test]
    fn test_course_json_is_camel_case() {
        let json = serde_json::to_value(sample_course()).unwrap();
        assert_eq!(json["instructorId"], 10);
        assert!(json.get("instructor_id").is_none());
    }

    #[test]
    fn test_course_with_sessions_flattens() {
        let json = serde_json::to_value(CourseWithSessions {
            course: sample_course(),
            sessions: vec![],
        })
        .unwrap();
        assert_eq!(json["title"], "Rust 101");
        assert!(json["sessions"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_update_dto_rejects_empty_title() {
        let dto = UpdateCourseDto {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
        assert!(UpdateCourseDto::default().validate().is_ok());
    }
}

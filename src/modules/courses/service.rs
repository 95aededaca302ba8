use tracing::{info, instrument};

use coursehub_auth::Identity;
use coursehub_core::AppError;
use coursehub_db::Datastore;
use coursehub_models::{CourseId, UserId};

use super::model::{Course, CourseWithSessions, CreateCourseDto, NewCourse, UpdateCourseDto};
use crate::metrics::track_course_created;
use crate::middleware::guard::owns_course;

pub struct CourseService;

impl CourseService {
    /// Fetches a course or fails with 404.
    pub async fn find_course(db: &dyn Datastore, course_id: CourseId) -> Result<Course, AppError> {
        db.find_course(course_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))
    }

    #[instrument(skip(db, dto), fields(instructor_id = %identity.id))]
    pub async fn create_course(
        db: &dyn Datastore,
        identity: Identity,
        dto: CreateCourseDto,
    ) -> Result<Course, AppError> {
        let course = db
            .create_course(NewCourse::from_dto(identity.id, dto))
            .await?;

        track_course_created();
        info!(course_id = %course.id, "Course created");

        Ok(course)
    }

    #[instrument(skip(db))]
    pub async fn list_published(
        db: &dyn Datastore,
        category: Option<String>,
    ) -> Result<Vec<Course>, AppError> {
        let category = category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());
        db.list_courses(category).await
    }

    #[instrument(skip(db))]
    pub async fn list_by_instructor(
        db: &dyn Datastore,
        instructor_id: UserId,
    ) -> Result<Vec<CourseWithSessions>, AppError> {
        let courses = db.list_courses_by_instructor(instructor_id).await?;

        let mut result = Vec::with_capacity(courses.len());
        for course in courses {
            let sessions = db.list_sessions(course.id).await?;
            result.push(CourseWithSessions { course, sessions });
        }

        Ok(result)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_course(
        db: &dyn Datastore,
        identity: Identity,
        course_id: CourseId,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        let course = Self::find_course(db, course_id).await?;
        owns_course(&identity, &course)?;

        db.update_course(course_id, dto.into())
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))
    }

    /// Deletes a course together with its sessions, enrollments, completions and ratings.
    #[instrument(skip(db))]
    pub async fn delete_course(
        db: &dyn Datastore,
        identity: Identity,
        course_id: CourseId,
    ) -> Result<(), AppError> {
        let course = Self::find_course(db, course_id).await?;
        owns_course(&identity, &course)?;

        if !db.delete_course(course_id).await? {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        info!(course_id = %course_id, "Course deleted");
        Ok(())
    }
}

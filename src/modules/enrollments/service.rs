use tracing::{info, instrument, warn};

use coursehub_auth::Identity;
use coursehub_core::AppError;
use coursehub_db::Datastore;
use coursehub_models::{Role, UserId};

use super::model::{CreateEnrollmentDto, Enrollment, EnrollmentWithCourse};
use crate::metrics::track_enrollment_created;
use crate::middleware::guard::is_self;
use crate::modules::courses::service::CourseService;

pub struct EnrollmentService;

impl EnrollmentService {
    /// Enrolls the calling student. Enrolling twice is a conflict.
    #[instrument(skip(db))]
    pub async fn enroll(
        db: &dyn Datastore,
        identity: Identity,
        dto: CreateEnrollmentDto,
    ) -> Result<Enrollment, AppError> {
        CourseService::find_course(db, dto.course_id).await?;

        if db
            .find_enrollment(identity.id, dto.course_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Already enrolled in this course"
            )));
        }

        let enrollment = db.create_enrollment(identity.id, dto.course_id).await?;

        track_enrollment_created();
        info!(enrollment_id = %enrollment.id, "Student enrolled");

        Ok(enrollment)
    }

    /// A student may list their own enrollments; instructors may list anyone's.
    #[instrument(skip(db))]
    pub async fn list_for_student(
        db: &dyn Datastore,
        identity: Identity,
        student_id: UserId,
    ) -> Result<Vec<EnrollmentWithCourse>, AppError> {
        match identity.role {
            Role::Instructor => {}
            Role::Student => is_self(&identity, student_id)?,
        }

        let enrollments = db.list_enrollments_by_student(student_id).await?;

        let mut result = Vec::with_capacity(enrollments.len());
        for enrollment in enrollments {
            match db.find_course(enrollment.course_id).await? {
                Some(course) => result.push(EnrollmentWithCourse { enrollment, course }),
                None => warn!(enrollment_id = %enrollment.id, "Enrollment refers to a missing course"),
            }
        }

        Ok(result)
    }
}

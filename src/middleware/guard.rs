//! Authorization predicates.
//!
//! Each guard looks only at the caller's identity and state the caller has
//! already fetched; none of them performs a lookup of its own. A failed check
//! is always a 403.

use coursehub_auth::Identity;
use coursehub_core::AppError;
use coursehub_models::{Course, Enrollment, Role, UserId};

pub fn role_is(identity: &Identity, expected: Role) -> Result<(), AppError> {
    if identity.role != expected {
        return Err(AppError::forbidden(format!(
            "Access denied. Requires the {} role",
            expected
        )));
    }
    Ok(())
}

pub fn is_self(identity: &Identity, owner_id: UserId) -> Result<(), AppError> {
    if identity.id != owner_id {
        return Err(AppError::forbidden(
            "Access denied. You can only access your own data",
        ));
    }
    Ok(())
}

/// The caller is an instructor and the course's owner. Also decides access
/// to the course's sessions.
pub fn owns_course(identity: &Identity, course: &Course) -> Result<(), AppError> {
    match identity.role {
        Role::Instructor if course.instructor_id == identity.id => Ok(()),
        Role::Instructor | Role::Student => Err(AppError::forbidden(
            "Access denied. You do not own this course",
        )),
    }
}

/// Unwraps the caller's enrollment, failing when there is none.
pub fn is_enrolled(enrollment: Option<Enrollment>) -> Result<Enrollment, AppError> {
    enrollment.ok_or_else(|| AppError::forbidden("You are not enrolled in this course"))
}

/// Course content is visible to its owning instructor and to enrolled students.
pub fn can_view_content(
    identity: &Identity,
    course: &Course,
    enrollment: Option<&Enrollment>,
) -> Result<(), AppError> {
    match identity.role {
        Role::Instructor => owns_course(identity, course),
        Role::Student => match enrollment {
            Some(e) if e.student_id == identity.id && e.course_id == course.id => Ok(()),
            _ => Err(AppError::forbidden("You are not enrolled in this course")),
        },
    }
}

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use coursehub_models::{
    CompletedSession, CompletionResponse, Course, CourseProgress, CourseWithSessions,
    CreateCourseDto, CreateEnrollmentDto, CreateSessionDto, Enrollment, EnrollmentResponse,
    EnrollmentWithCourse, ExternalLoginRequest, LoginRequest, LoginResponse, MessageResponse,
    RateSessionDto, Rating, RegisterRequest, Role, Session, UpdateCourseDto, UpdateSessionDto,
    User,
};

use crate::modules::auth::model::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::external_login,
        crate::modules::auth::controller::logout_user,
        crate::modules::auth::controller::get_current_user,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::list_published_courses,
        crate::modules::courses::controller::list_instructor_courses,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::sessions::controller::create_session,
        crate::modules::sessions::controller::list_sessions,
        crate::modules::sessions::controller::get_session,
        crate::modules::sessions::controller::update_session,
        crate::modules::sessions::controller::delete_session,
        crate::modules::enrollments::controller::enroll,
        crate::modules::enrollments::controller::list_student_enrollments,
        crate::modules::dashboard::controller::get_student_dashboard,
        crate::modules::dashboard::controller::complete_session,
        crate::modules::dashboard::controller::rate_session,
    ),
    components(
        schemas(
            User,
            Role,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            ExternalLoginRequest,
            MessageResponse,
            ErrorResponse,
            Course,
            CourseWithSessions,
            CreateCourseDto,
            UpdateCourseDto,
            Session,
            CreateSessionDto,
            UpdateSessionDto,
            Enrollment,
            CreateEnrollmentDto,
            EnrollmentResponse,
            EnrollmentWithCourse,
            CompletedSession,
            CompletionResponse,
            Rating,
            RateSessionDto,
            CourseProgress,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and the auth cookie"),
        (name = "Courses", description = "Course management"),
        (name = "Sessions", description = "Course content sessions"),
        (name = "Enrollments", description = "Student enrollments"),
        (name = "Dashboard", description = "Progress, completion and ratings")
    ),
    info(
        title = "Coursehub API",
        version = "0.1.0",
        description = "Course-learning backend built with Rust, Axum, and PostgreSQL. Authentication uses a signed token in an HTTP-only cookie.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("authToken"))),
            )
        }
    }
}

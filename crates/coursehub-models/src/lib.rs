//! # Coursehub Models
//!
//! Domain entities, request/response DTOs, and datastore inputs.
//!
//! # Modules
//!
//! - [`ids`]: strongly-typed numeric identifiers
//! - [`users`]: users, the closed [`Role`] enumeration, credentials
//! - [`auth`]: login, registration and external sign-in payloads
//! - [`courses`]: courses and their DTOs
//! - [`sessions`]: course content sessions (not to be confused with the auth session)
//! - [`enrollments`]: student enrollments
//! - [`progress`]: completed sessions, ratings, and the dashboard progress view

pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod ids;
pub mod progress;
pub mod sessions;
pub mod users;

pub use auth::{
    ExternalLoginRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
};
pub use courses::{
    Course, CourseChanges, CourseWithSessions, CreateCourseDto, NewCourse, PublishedCoursesQuery,
    UpdateCourseDto,
};
pub use enrollments::{CreateEnrollmentDto, Enrollment, EnrollmentResponse, EnrollmentWithCourse};
pub use ids::{CompletedSessionId, CourseId, EnrollmentId, RatingId, SessionId, UserId};
pub use progress::{
    CompletedSession, CompletionResponse, CourseProgress, NewCompletedSession, NewRating,
    RateSessionDto, Rating,
};
pub use sessions::{
    CreateSessionDto, NewSession, Session, SessionChanges, UpdateSessionDto, next_order,
};
pub use users::{NewUser, Role, User, UserCredentials};

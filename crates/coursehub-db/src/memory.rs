//! In-memory [`Datastore`] used by tests.
//!
//! Mirrors the PostgreSQL schema: the same unique keys are enforced, inserts
//! that reference a missing row fail with not found, and deletes cascade.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use coursehub_core::AppError;
use coursehub_models::{
    CompletedSession, CompletedSessionId, Course, CourseChanges, CourseId, Enrollment,
    EnrollmentId, NewCompletedSession, NewCourse, NewRating, NewSession, NewUser, Rating,
    RatingId, Session, SessionChanges, SessionId, User, UserCredentials, UserId,
};

use crate::Datastore;

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: Vec<UserCredentials>,
    courses: Vec<Course>,
    sessions: Vec<Session>,
    enrollments: Vec<Enrollment>,
    completions: Vec<CompletedSession>,
    ratings: Vec<Rating>,
}

impl Tables {
    // One sequence for every table keeps ids unique across entity kinds,
    // which makes a mixed-up id show up as not found in tests.
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn remove_session_dependents(&mut self, session_ids: &[SessionId]) {
        self.completions
            .retain(|c| !session_ids.contains(&c.session_id));
        self.ratings.retain(|r| !session_ids.contains(&r.session_id));
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn conflict(message: &'static str) -> AppError {
    AppError::conflict(anyhow::anyhow!(message))
}

fn missing_reference() -> AppError {
    AppError::not_found(anyhow::anyhow!("Referenced resource not found"))
}

#[async_trait]
impl Datastore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(conflict("A user with this email already exists"));
        }
        let credentials = UserCredentials {
            id: UserId::new(tables.next_id()),
            email: user.email,
            role: user.role,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.push(credentials.clone());
        Ok(credentials.into_user())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserCredentials>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .map(UserCredentials::into_user))
    }

    async fn create_course(&self, course: NewCourse) -> Result<Course, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.id == course.instructor_id) {
            return Err(missing_reference());
        }
        let now = Utc::now();
        let course = Course {
            id: CourseId::new(tables.next_id()),
            instructor_id: course.instructor_id,
            title: course.title,
            description: course.description,
            category: course.category,
            created_at: now,
            updated_at: now,
        };
        tables.courses.push(course.clone());
        Ok(course)
    }

    async fn find_course(&self, id: CourseId) -> Result<Option<Course>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn list_courses(&self, category: Option<&str>) -> Result<Vec<Course>, AppError> {
        let tables = self.tables.read().await;
        let mut courses: Vec<Course> = tables
            .courses
            .iter()
            .filter(|c| category.is_none_or(|cat| c.category == cat))
            .cloned()
            .collect();
        courses.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(courses)
    }

    async fn list_courses_by_instructor(
        &self,
        instructor_id: UserId,
    ) -> Result<Vec<Course>, AppError> {
        let tables = self.tables.read().await;
        let mut courses: Vec<Course> = tables
            .courses
            .iter()
            .filter(|c| c.instructor_id == instructor_id)
            .cloned()
            .collect();
        courses.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(courses)
    }

    async fn update_course(
        &self,
        id: CourseId,
        changes: CourseChanges,
    ) -> Result<Option<Course>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(course) = tables.courses.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        changes.apply(course);
        course.updated_at = Utc::now();
        Ok(Some(course.clone()))
    }

    async fn delete_course(&self, id: CourseId) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.courses.len();
        tables.courses.retain(|c| c.id != id);
        if tables.courses.len() == before {
            return Ok(false);
        }

        let session_ids: Vec<SessionId> = tables
            .sessions
            .iter()
            .filter(|s| s.course_id == id)
            .map(|s| s.id)
            .collect();
        tables.sessions.retain(|s| s.course_id != id);
        tables.remove_session_dependents(&session_ids);

        let enrollment_ids: Vec<EnrollmentId> = tables
            .enrollments
            .iter()
            .filter(|e| e.course_id == id)
            .map(|e| e.id)
            .collect();
        tables.enrollments.retain(|e| e.course_id != id);
        tables
            .completions
            .retain(|c| !enrollment_ids.contains(&c.enrollment_id));
        tables
            .ratings
            .retain(|r| !enrollment_ids.contains(&r.enrollment_id));

        Ok(true)
    }

    async fn create_session(&self, session: NewSession) -> Result<Session, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.courses.iter().any(|c| c.id == session.course_id) {
            return Err(missing_reference());
        }
        let now = Utc::now();
        let session = Session {
            id: SessionId::new(tables.next_id()),
            course_id: session.course_id,
            order: session.order,
            title: session.title,
            video_link: session.video_link,
            explanation: session.explanation,
            created_at: now,
            updated_at: now,
        };
        tables.sessions.push(session.clone());
        Ok(session)
    }

    async fn find_session(&self, id: SessionId) -> Result<Option<Session>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.sessions.iter().find(|s| s.id == id).cloned())
    }

    async fn list_sessions(&self, course_id: CourseId) -> Result<Vec<Session>, AppError> {
        let tables = self.tables.read().await;
        let mut sessions: Vec<Session> = tables
            .sessions
            .iter()
            .filter(|s| s.course_id == course_id)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| (s.order, s.id));
        Ok(sessions)
    }

    async fn update_session(
        &self,
        id: SessionId,
        changes: SessionChanges,
    ) -> Result<Option<Session>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(session) = tables.sessions.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        changes.apply(session);
        session.updated_at = Utc::now();
        Ok(Some(session.clone()))
    }

    async fn delete_session(&self, id: SessionId) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|s| s.id != id);
        if tables.sessions.len() == before {
            return Ok(false);
        }
        tables.remove_session_dependents(&[id]);
        Ok(true)
    }

    async fn create_enrollment(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<Enrollment, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.id == student_id)
            || !tables.courses.iter().any(|c| c.id == course_id)
        {
            return Err(missing_reference());
        }
        if tables
            .enrollments
            .iter()
            .any(|e| e.student_id == student_id && e.course_id == course_id)
        {
            return Err(conflict("Already enrolled in this course"));
        }
        let enrollment = Enrollment {
            id: EnrollmentId::new(tables.next_id()),
            student_id,
            course_id,
            created_at: Utc::now(),
        };
        tables.enrollments.push(enrollment.clone());
        Ok(enrollment)
    }

    async fn find_enrollment(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<Option<Enrollment>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .enrollments
            .iter()
            .find(|e| e.student_id == student_id && e.course_id == course_id)
            .cloned())
    }

    async fn list_enrollments_by_student(
        &self,
        student_id: UserId,
    ) -> Result<Vec<Enrollment>, AppError> {
        let tables = self.tables.read().await;
        let mut enrollments: Vec<Enrollment> = tables
            .enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .cloned()
            .collect();
        enrollments.sort_by_key(|e| (e.created_at, e.id));
        Ok(enrollments)
    }

    async fn create_completed_session(
        &self,
        completion: NewCompletedSession,
    ) -> Result<CompletedSession, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.sessions.iter().any(|s| s.id == completion.session_id)
            || !tables
                .enrollments
                .iter()
                .any(|e| e.id == completion.enrollment_id)
        {
            return Err(missing_reference());
        }
        if tables.completions.iter().any(|c| {
            c.student_id == completion.student_id && c.session_id == completion.session_id
        }) {
            return Err(conflict("Session already completed"));
        }
        let completed = CompletedSession {
            id: CompletedSessionId::new(tables.next_id()),
            student_id: completion.student_id,
            session_id: completion.session_id,
            enrollment_id: completion.enrollment_id,
            completed_at: Utc::now(),
        };
        tables.completions.push(completed.clone());
        Ok(completed)
    }

    async fn find_completed_session(
        &self,
        student_id: UserId,
        session_id: SessionId,
    ) -> Result<Option<CompletedSession>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .completions
            .iter()
            .find(|c| c.student_id == student_id && c.session_id == session_id)
            .cloned())
    }

    async fn list_completed_sessions(
        &self,
        student_id: UserId,
    ) -> Result<Vec<CompletedSession>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .completions
            .iter()
            .filter(|c| c.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn create_rating(&self, rating: NewRating) -> Result<Rating, AppError> {
        let mut tables = self.tables.write().await;
        if !(1..=5).contains(&rating.rating) {
            return Err(AppError::bad_request(anyhow::anyhow!("Value out of range")));
        }
        if !tables.sessions.iter().any(|s| s.id == rating.session_id)
            || !tables.enrollments.iter().any(|e| e.id == rating.enrollment_id)
        {
            return Err(missing_reference());
        }
        if tables
            .ratings
            .iter()
            .any(|r| r.student_id == rating.student_id && r.session_id == rating.session_id)
        {
            return Err(conflict("You have already rated this session"));
        }
        let rating = Rating {
            id: RatingId::new(tables.next_id()),
            student_id: rating.student_id,
            session_id: rating.session_id,
            enrollment_id: rating.enrollment_id,
            rating: rating.rating,
            created_at: Utc::now(),
        };
        tables.ratings.push(rating.clone());
        Ok(rating)
    }

    async fn find_rating(
        &self,
        student_id: UserId,
        session_id: SessionId,
    ) -> Result<Option<Rating>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .ratings
            .iter()
            .find(|r| r.student_id == student_id && r.session_id == session_id)
            .cloned())
    }
}

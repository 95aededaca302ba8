//! Fake demo data: instructors with courses and sessions, students with
//! enrollments.
//!
//! Every seeded account shares one password so it can be used to sign in.
//! Emails are prefixed with `seed-` and a running index; re-running the
//! seeder skips accounts that already exist.

use std::time::Instant;

use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Paragraph, Sentence, Words};

use coursehub_core::{AppError, ErrorKind, hash_password};
use coursehub_db::Datastore;
use coursehub_models::{CourseId, NewCourse, NewSession, NewUser, Role, UserId};

pub const SEED_PASSWORD: &str = "password123";

const CATEGORIES: &[&str] = &[
    "programming",
    "design",
    "mathematics",
    "languages",
    "music",
    "business",
];

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub instructors: usize,
    pub courses_per_instructor: usize,
    pub sessions_per_course: usize,
    pub students: usize,
    pub enrollments_per_student: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            instructors: 3,
            courses_per_instructor: 2,
            sessions_per_course: 5,
            students: 20,
            enrollments_per_student: 2,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub instructors: usize,
    pub students: usize,
    pub courses: usize,
    pub sessions: usize,
    pub enrollments: usize,
}

pub async fn seed_all(db: &dyn Datastore, config: &SeedConfig) -> Result<SeedSummary, AppError> {
    let start_time = Instant::now();
    let password_hash = hash_password(SEED_PASSWORD)?;
    let mut summary = SeedSummary::default();

    println!("👩‍🏫 Seeding {} instructors...", config.instructors);
    let instructors =
        seed_users(db, Role::Instructor, config.instructors, &password_hash).await?;
    summary.instructors = instructors.len();

    println!("📚 Seeding courses and sessions...");
    let mut course_ids = Vec::new();
    for instructor_id in &instructors {
        for _ in 0..config.courses_per_instructor {
            let course_id = seed_course(db, *instructor_id).await?;
            summary.sessions += seed_sessions(db, course_id, config.sessions_per_course).await?;
            course_ids.push(course_id);
        }
    }
    summary.courses = course_ids.len();

    println!("🎓 Seeding {} students...", config.students);
    let students = seed_users(db, Role::Student, config.students, &password_hash).await?;
    summary.students = students.len();

    if !course_ids.is_empty() {
        for student_id in &students {
            summary.enrollments += seed_enrollments(
                db,
                *student_id,
                &course_ids,
                config.enrollments_per_student,
            )
            .await?;
        }
    }

    println!("   ✓ Seeding finished in {:?}", start_time.elapsed());
    Ok(summary)
}

/// Creates `count` users of `role`, skipping emails that are already taken.
pub async fn seed_users(
    db: &dyn Datastore,
    role: Role,
    count: usize,
    password_hash: &str,
) -> Result<Vec<UserId>, AppError> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let email = format!("seed-{}-{}-{}", role, i, SafeEmail().fake::<String>())
            .to_lowercase();
        let user = NewUser {
            email,
            password_hash: password_hash.to_string(),
            role,
        };
        match db.create_user(user).await {
            Ok(user) => ids.push(user.id),
            Err(e) if e.kind() == ErrorKind::Conflict => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(ids)
}

async fn seed_course(db: &dyn Datastore, instructor_id: UserId) -> Result<CourseId, AppError> {
    let category = CATEGORIES[(0..CATEGORIES.len()).fake::<usize>()];
    let title: Vec<String> = Words(2..5).fake();
    let course = db
        .create_course(NewCourse {
            instructor_id,
            title: capitalize(&title.join(" ")),
            description: Paragraph(2..4).fake(),
            category: category.to_string(),
        })
        .await?;
    Ok(course.id)
}

async fn seed_sessions(
    db: &dyn Datastore,
    course_id: CourseId,
    count: usize,
) -> Result<usize, AppError> {
    for order in 1..=count {
        db.create_session(NewSession {
            course_id,
            order: order as i32,
            title: Sentence(2..6).fake(),
            video_link: format!(
                "https://videos.coursehub.dev/watch/{}",
                (100_000..999_999).fake::<u32>()
            ),
            explanation: Paragraph(1..3).fake(),
        })
        .await?;
    }
    Ok(count)
}

/// Enrolls a student in up to `count` distinct random courses.
async fn seed_enrollments(
    db: &dyn Datastore,
    student_id: UserId,
    course_ids: &[CourseId],
    count: usize,
) -> Result<usize, AppError> {
    let mut created = 0;
    for _ in 0..count.min(course_ids.len()) {
        let course_id = course_ids[(0..course_ids.len()).fake::<usize>()];
        match db.create_enrollment(student_id, course_id).await {
            Ok(_) => created += 1,
            Err(e) if e.kind() == ErrorKind::Conflict => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(created)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursehub_db::MemoryStore;

    #[tokio::test]
    async fn test_seed_all_populates_store() {
        let store = MemoryStore::new();
        let config = SeedConfig {
            instructors: 2,
            courses_per_instructor: 2,
            sessions_per_course: 3,
            students: 4,
            enrollments_per_student: 1,
        };

        let summary = seed_all(&store, &config).await.unwrap();
        assert_eq!(summary.instructors, 2);
        assert_eq!(summary.courses, 4);
        assert_eq!(summary.sessions, 12);
        assert_eq!(summary.students, 4);
        assert_eq!(summary.enrollments, 4);

        let courses = store.list_courses(None).await.unwrap();
        assert_eq!(courses.len(), 4);
        let sessions = store.list_sessions(courses[0].id).await.unwrap();
        let orders: Vec<i32> = sessions.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_seed_without_courses_skips_enrollments() {
        let store = MemoryStore::new();
        let config = SeedConfig {
            instructors: 0,
            students: 3,
            ..SeedConfig::default()
        };

        let summary = seed_all(&store, &config).await.unwrap();
        assert_eq!(summary.students, 3);
        assert_eq!(summary.enrollments, 0);
    }

    #[tokio::test]
    async fn test_seeded_users_can_log_in() {
        let store = MemoryStore::new();
        let digest = hash_password(SEED_PASSWORD).unwrap();
        let ids = seed_users(&store, Role::Student, 1, &digest).await.unwrap();
        let user = store.find_user_by_id(ids[0]).await.unwrap().unwrap();
        assert!(user.email.starts_with("seed-student-0-"));

        let creds = store.find_user_by_email(&user.email).await.unwrap().unwrap();
        assert!(coursehub_core::verify_password(SEED_PASSWORD, &creds.password_hash).unwrap());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("rust basics"), "Rust basics");
        assert_eq!(capitalize(""), "");
    }
}

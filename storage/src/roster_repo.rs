//! Roster repository: persistence and queries for students, courses and enrollments.
//!
//! Uses SqlitePoolManager and the models (Student, Course, Enrollment). Every sqlx failure goes
//! through [`classify`], so callers only ever see [`StorageError`] with domain wording.

use async_trait::async_trait;
use ccrms_core::{DriverFailure, FailureKind, Result, StorageError};
use sqlx::SqlitePool;
use tracing::info;

use crate::classify::classify;
use crate::models::{Course, Enrollment, Student};
use crate::repository::RosterStore;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct RosterRepository {
    pool_manager: SqlitePoolManager,
}

impl RosterRepository {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool_manager = SqlitePoolManager::new(database_url)
            .await
            .map_err(|e| classify(e, |_| "roster database could not be opened".to_string()))?;
        let repo = Self { pool_manager };
        repo.init()
            .await
            .map_err(|e| classify(e, |_| "roster schema could not be created".to_string()))?;
        Ok(repo)
    }

    async fn init(&self) -> std::result::Result<(), sqlx::Error> {
        info!("Creating roster tables if not exist");

        let pool = self.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS students (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL CHECK (length(trim(name)) > 0),
                email TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS courses (
                code TEXT PRIMARY KEY NOT NULL,
                title TEXT NOT NULL,
                capacity INTEGER NOT NULL CHECK (capacity > 0),
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS enrollments (
                student_id TEXT NOT NULL REFERENCES students(id) ON DELETE CASCADE,
                course_code TEXT NOT NULL REFERENCES courses(code) ON DELETE CASCADE,
                enrolled_at TEXT NOT NULL,
                PRIMARY KEY (student_id, course_code)
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_enrollments_course_code ON enrollments(course_code)",
        )
        .execute(pool)
        .await?;

        info!("Roster tables created successfully");
        Ok(())
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        self.pool_manager.pool()
    }

    /// Closes the pool; later calls fail with a connection-lost infrastructure error.
    pub async fn close(&self) {
        self.pool().close().await;
    }
}

fn describe_student(student: &Student, failure: &DriverFailure) -> String {
    match failure.kind() {
        FailureKind::UniqueViolation if failure.message().contains("email") => format!(
            "email {} is already registered to another student",
            student.email
        ),
        FailureKind::UniqueViolation => {
            format!("student {} is already on the roster", student.id)
        }
        FailureKind::CheckViolation => format!("student {} must have a non-empty name", student.id),
        _ => format!("student {} is missing a required field", student.id),
    }
}

fn describe_course(course: &Course, failure: &DriverFailure) -> String {
    match failure.kind() {
        FailureKind::UniqueViolation => format!("course {} already exists", course.code),
        FailureKind::CheckViolation => format!(
            "course {} must have a positive capacity, got {}",
            course.code, course.capacity
        ),
        _ => format!("course {} is missing a required field", course.code),
    }
}

fn describe_enrollment(enrollment: &Enrollment, failure: &DriverFailure) -> String {
    match failure.kind() {
        FailureKind::UniqueViolation => format!(
            "student {} is already enrolled in {}",
            enrollment.student_id, enrollment.course_code
        ),
        FailureKind::ForeignKeyViolation => format!(
            "cannot enroll {} in {}: student or course does not exist",
            enrollment.student_id, enrollment.course_code
        ),
        _ => format!(
            "enrollment of {} in {} violates a roster rule",
            enrollment.student_id, enrollment.course_code
        ),
    }
}

fn read_failure(what: String) -> impl FnOnce(sqlx::Error) -> StorageError {
    move |e| classify(e, |_| format!("{} violates a roster rule", what))
}

#[async_trait]
impl RosterStore for RosterRepository {
    async fn add_student(&self, student: &Student) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO students (id, name, email, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&student.id)
        .bind(&student.name)
        .bind(&student.email)
        .bind(student.created_at)
        .execute(self.pool())
        .await
        .map_err(|e| classify(e, |f| describe_student(student, f)))?;

        info!(student_id = %student.id, "Saved student");
        Ok(())
    }

    async fn add_course(&self, course: &Course) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO courses (code, title, capacity, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&course.code)
        .bind(&course.title)
        .bind(course.capacity)
        .bind(course.created_at)
        .execute(self.pool())
        .await
        .map_err(|e| classify(e, |f| describe_course(course, f)))?;

        info!(course_code = %course.code, capacity = course.capacity, "Saved course");
        Ok(())
    }

    async fn enroll(&self, enrollment: &Enrollment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO enrollments (student_id, course_code, enrolled_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&enrollment.student_id)
        .bind(&enrollment.course_code)
        .bind(enrollment.enrolled_at)
        .execute(self.pool())
        .await
        .map_err(|e| classify(e, |f| describe_enrollment(enrollment, f)))?;

        info!(
            student_id = %enrollment.student_id,
            course_code = %enrollment.course_code,
            "Saved enrollment"
        );
        Ok(())
    }

    async fn withdraw(&self, student_id: &str, course_code: &str) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM enrollments WHERE student_id = ? AND course_code = ?")
                .bind(student_id)
                .bind(course_code)
                .execute(self.pool())
                .await
                .map_err(read_failure(format!(
                    "withdrawal of {} from {}",
                    student_id, course_code
                )))?;

        info!(
            student_id = %student_id,
            course_code = %course_code,
            removed = result.rows_affected(),
            "Withdrew enrollment"
        );
        Ok(result.rows_affected() > 0)
    }

    async fn get_student(&self, id: &str) -> Result<Option<Student>> {
        let student = sqlx::query_as::<_, Student>("SELECT * FROM students WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(read_failure(format!("lookup of student {}", id)))?;

        Ok(student)
    }

    async fn get_course(&self, code: &str) -> Result<Option<Course>> {
        let course = sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE code = ?")
            .bind(code)
            .fetch_optional(self.pool())
            .await
            .map_err(read_failure(format!("lookup of course {}", code)))?;

        Ok(course)
    }

    async fn list_enrollments(&self, course_code: &str) -> Result<Vec<Enrollment>> {
        let enrollments: Vec<Enrollment> = sqlx::query_as::<_, Enrollment>(
            "SELECT * FROM enrollments WHERE course_code = ? ORDER BY enrolled_at ASC, student_id ASC",
        )
        .bind(course_code)
        .fetch_all(self.pool())
        .await
        .map_err(read_failure(format!("roster of course {}", course_code)))?;

        info!(
            course_code = %course_code,
            "Retrieved {} enrollments",
            enrollments.len()
        );
        Ok(enrollments)
    }

    async fn count_enrollments(&self, course_code: &str) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM enrollments WHERE course_code = ?")
                .bind(course_code)
                .fetch_one(self.pool())
                .await
                .map_err(read_failure(format!("count of course {}", course_code)))?;

        Ok(count.0)
    }
}

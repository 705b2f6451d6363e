//! Roster service: validates requests, applies application-level rules, and calls the store
//! through the retry policy.
//!
//! Storage errors are propagated with `?` exactly as the store returned them; this layer only
//! adds integrity errors of its own for rules the schema cannot express.

use std::sync::Arc;

use ccrms_core::{IntegrityError, Result};
use storage::{Course, Enrollment, RosterStore, Student};
use tracing::{info, instrument};

use crate::retry::RetryPolicy;

#[derive(Clone)]
pub struct RosterService {
    store: Arc<dyn RosterStore>,
    retry: RetryPolicy,
}

impl RosterService {
    pub fn new(store: Arc<dyn RosterStore>, retry: RetryPolicy) -> Self {
        Self { store, retry }
    }

    #[instrument(skip(self))]
    pub async fn add_student(&self, id: &str, name: &str, email: &str) -> Result<Student> {
        if id.trim().is_empty() {
            return Err(IntegrityError::new("student id must not be empty").into());
        }
        if name.trim().is_empty() {
            return Err(
                IntegrityError::new(format!("student {} must have a non-empty name", id)).into(),
            );
        }

        let student = Student::new(id, name.trim(), email.trim());
        self.retry
            .run("add_student", || self.store.add_student(&student))
            .await?;

        info!(student_id = %student.id, "step: student added");
        Ok(student)
    }

    #[instrument(skip(self))]
    pub async fn add_course(&self, code: &str, title: &str, capacity: i64) -> Result<Course> {
        if code.trim().is_empty() {
            return Err(IntegrityError::new("course code must not be empty").into());
        }
        if capacity <= 0 {
            return Err(IntegrityError::new(format!(
                "course {} must have a positive capacity, got {}",
                code, capacity
            ))
            .into());
        }

        let course = Course::new(code, title.trim(), capacity);
        self.retry
            .run("add_course", || self.store.add_course(&course))
            .await?;

        info!(course_code = %course.code, "step: course added");
        Ok(course)
    }

    /// Enrolls a student, rejecting the request up front when the course is already full.
    ///
    /// The capacity check and the insert are separate statements, so two concurrent enrollments
    /// for the last seat can both pass the check.
    #[instrument(skip(self))]
    pub async fn enroll(&self, student_id: &str, course_code: &str) -> Result<Enrollment> {
        let course = self
            .retry
            .run("get_course", || self.store.get_course(course_code))
            .await?;

        // An unknown course is left to the foreign key, so the store names the violation.
        if let Some(course) = course {
            let taken = self
                .retry
                .run("count_enrollments", || {
                    self.store.count_enrollments(course_code)
                })
                .await?;
            // A repeat enrollment in a full course should report the duplicate, not the capacity.
            if taken >= course.capacity && !self.is_enrolled(student_id, course_code).await? {
                return Err(IntegrityError::new(format!(
                    "course {} is full (capacity {})",
                    course.code, course.capacity
                ))
                .into());
            }
        }

        let enrollment = Enrollment::new(student_id, course_code);
        self.retry
            .run("enroll", || self.store.enroll(&enrollment))
            .await?;

        info!(
            student_id = %student_id,
            course_code = %course_code,
            "step: student enrolled"
        );
        Ok(enrollment)
    }

    async fn is_enrolled(&self, student_id: &str, course_code: &str) -> Result<bool> {
        let roster = self
            .retry
            .run("list_enrollments", || self.store.list_enrollments(course_code))
            .await?;
        Ok(roster.iter().any(|e| e.student_id == student_id))
    }

    /// Returns false when there was no such enrollment.
    #[instrument(skip(self))]
    pub async fn withdraw(&self, student_id: &str, course_code: &str) -> Result<bool> {
        self.retry
            .run("withdraw", || self.store.withdraw(student_id, course_code))
            .await
    }

    #[instrument(skip(self))]
    pub async fn roster(&self, course_code: &str) -> Result<Vec<Enrollment>> {
        self.retry
            .run("list_enrollments", || self.store.list_enrollments(course_code))
            .await
    }
}

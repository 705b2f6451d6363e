use async_trait::async_trait;
use ccrms_core::Result;

use crate::models::{Course, Enrollment, Student};

/// Roster persistence. Every write either succeeds, fails with an integrity error that names
/// the broken invariant, or fails with an infrastructure error.
#[async_trait]
pub trait RosterStore: Send + Sync {
    async fn add_student(&self, student: &Student) -> Result<()>;
    async fn add_course(&self, course: &Course) -> Result<()>;
    async fn enroll(&self, enrollment: &Enrollment) -> Result<()>;
    /// Returns false when the student was not enrolled in the course.
    async fn withdraw(&self, student_id: &str, course_code: &str) -> Result<bool>;
    async fn get_student(&self, id: &str) -> Result<Option<Student>>;
    async fn get_course(&self, code: &str) -> Result<Option<Course>>;
    async fn list_enrollments(&self, course_code: &str) -> Result<Vec<Enrollment>>;
    async fn count_enrollments(&self, course_code: &str) -> Result<i64>;
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A student's seat in a course. `(student_id, course_code)` is unique and both sides must exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Enrollment {
    pub student_id: String,
    pub course_code: String,
    pub enrolled_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn new(student_id: impl Into<String>, course_code: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            course_code: course_code.into(),
            enrolled_at: Utc::now(),
        }
    }
}

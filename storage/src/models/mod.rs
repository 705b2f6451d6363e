//! Roster records: students, courses and enrollments.

mod course;
mod enrollment;
mod student;

pub use course::Course;
pub use enrollment::Enrollment;
pub use student::Student;

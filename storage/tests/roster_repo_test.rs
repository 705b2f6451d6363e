//! Integration tests for [`storage::RosterRepository`].
//!
//! Covers the happy path for students, courses and enrollments, withdrawal, and that integrity
//! rules survive reopening an on-disk database.

use storage::{Course, Enrollment, FailureKind, RosterRepository, RosterStore, Student};

/// **Test: Saved student, course and enrollment are readable.**
///
/// **Setup:** In-memory DB; save one student and one course, enroll the student.
/// **Action:** `get_student`, `get_course`, `list_enrollments`, `count_enrollments`.
/// **Expected:** Records match what was saved; the course has one enrollment.
#[tokio::test]
async fn test_roster_round_trip() {
    let repo = RosterRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    repo.add_student(&Student::new("S1001", "Ada Lovelace", "ada@uni.edu"))
        .await
        .expect("Failed to save student");
    repo.add_course(&Course::new("CS101", "Intro to Computing", 30))
        .await
        .expect("Failed to save course");
    repo.enroll(&Enrollment::new("S1001", "CS101"))
        .await
        .expect("Failed to enroll");

    let student = repo.get_student("S1001").await.unwrap().expect("student exists");
    assert_eq!(student.name, "Ada Lovelace");
    assert_eq!(student.email, "ada@uni.edu");

    let course = repo.get_course("CS101").await.unwrap().expect("course exists");
    assert_eq!(course.capacity, 30);

    let enrollments = repo.list_enrollments("CS101").await.unwrap();
    assert_eq!(enrollments.len(), 1);
    assert_eq!(enrollments[0].student_id, "S1001");
    assert_eq!(repo.count_enrollments("CS101").await.unwrap(), 1);
}

/// **Test: Lookups of missing records return None.**
#[tokio::test]
async fn test_missing_records() {
    let repo = RosterRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    assert!(repo.get_student("nobody").await.unwrap().is_none());
    assert!(repo.get_course("NONE").await.unwrap().is_none());
    assert!(repo.list_enrollments("NONE").await.unwrap().is_empty());
    assert_eq!(repo.count_enrollments("NONE").await.unwrap(), 0);
}

/// **Test: Withdraw removes an enrollment once.**
///
/// **Expected:** First withdraw returns true, second returns false, re-enrolling works.
#[tokio::test]
async fn test_withdraw() {
    let repo = RosterRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    repo.add_student(&Student::new("S1", "Ada", "ada@uni.edu")).await.unwrap();
    repo.add_course(&Course::new("CS101", "Intro", 2)).await.unwrap();
    repo.enroll(&Enrollment::new("S1", "CS101")).await.unwrap();

    assert!(repo.withdraw("S1", "CS101").await.unwrap());
    assert!(!repo.withdraw("S1", "CS101").await.unwrap());
    assert_eq!(repo.count_enrollments("CS101").await.unwrap(), 0);

    repo.enroll(&Enrollment::new("S1", "CS101")).await.unwrap();
    assert_eq!(repo.count_enrollments("CS101").await.unwrap(), 1);
}

/// **Test: Enrolling twice is a uniqueness violation.**
#[tokio::test]
async fn test_duplicate_enrollment() {
    let repo = RosterRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    repo.add_student(&Student::new("S1", "Ada", "ada@uni.edu")).await.unwrap();
    repo.add_course(&Course::new("CS101", "Intro", 2)).await.unwrap();
    repo.enroll(&Enrollment::new("S1", "CS101")).await.unwrap();

    let err = repo.enroll(&Enrollment::new("S1", "CS101")).await.unwrap_err();
    let integrity = err.as_integrity().expect("integrity error");
    assert_eq!(integrity.message(), "student S1 is already enrolled in CS101");
    assert_eq!(integrity.cause().unwrap().kind(), FailureKind::UniqueViolation);
}

/// **Test: Constraints hold after reopening an on-disk database.**
///
/// **Setup:** Temp file DB; save a student, drop the repository, reopen the same file.
/// **Action:** Save a student with the same id.
/// **Expected:** Integrity error naming the id.
#[tokio::test]
async fn test_constraints_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("roster.db").display());

    {
        let repo = RosterRepository::new(&url).await.expect("Failed to create repository");
        repo.add_student(&Student::new("S1001", "Ada", "ada@uni.edu")).await.unwrap();
        repo.close().await;
    }

    let repo = RosterRepository::new(&url).await.expect("Failed to reopen repository");
    let err = repo
        .add_student(&Student::new("S1001", "Ada", "other@uni.edu"))
        .await
        .unwrap_err();

    assert!(err.as_integrity().unwrap().message().contains("S1001"));
}

//! Unit tests for RosterRepository.
//!
//! Covers how real SQLite failures are classified: constraint failures become integrity errors
//! with domain wording, malformed SQL and a closed pool stay infrastructure failures.

use ccrms_core::{FailureKind, StorageError};

use crate::classify::classify;
use crate::models::{Course, Enrollment, Student};
use crate::repository::RosterStore;
use crate::roster_repo::RosterRepository;

async fn new_repo() -> RosterRepository {
    RosterRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository")
}

#[tokio::test]
async fn test_duplicate_primary_key_is_integrity_error() {
    let repo = new_repo().await;

    repo.add_student(&Student::new("S1001", "Ada", "ada@uni.edu"))
        .await
        .expect("Failed to save student");

    let err = repo
        .add_student(&Student::new("S1001", "Grace", "grace@uni.edu"))
        .await
        .expect_err("duplicate id must be rejected");

    let integrity = err.as_integrity().expect("integrity error");
    assert_eq!(integrity.message(), "student S1001 is already on the roster");
    let cause = integrity.cause().expect("driver cause kept");
    assert_eq!(cause.kind(), FailureKind::UniqueViolation);
    assert!(cause.message().contains("UNIQUE constraint failed"));
    assert!(!integrity.message().contains("UNIQUE"));
}

#[tokio::test]
async fn test_duplicate_email_is_integrity_error() {
    let repo = new_repo().await;

    repo.add_student(&Student::new("S1", "Ada", "shared@uni.edu"))
        .await
        .expect("Failed to save student");

    let err = repo
        .add_student(&Student::new("S2", "Grace", "shared@uni.edu"))
        .await
        .unwrap_err();

    assert_eq!(
        err.as_integrity().unwrap().message(),
        "email shared@uni.edu is already registered to another student"
    );
}

#[tokio::test]
async fn test_empty_name_is_check_violation() {
    let repo = new_repo().await;

    let err = repo
        .add_student(&Student::new("S1", "  ", "blank@uni.edu"))
        .await
        .unwrap_err();

    let integrity = err.as_integrity().expect("integrity error");
    assert_eq!(integrity.cause().unwrap().kind(), FailureKind::CheckViolation);
    assert_eq!(integrity.message(), "student S1 must have a non-empty name");
}

#[tokio::test]
async fn test_non_positive_capacity_is_check_violation() {
    let repo = new_repo().await;

    let err = repo
        .add_course(&Course::new("CS101", "Intro", 0))
        .await
        .unwrap_err();

    assert_eq!(
        err.as_integrity().unwrap().cause().unwrap().kind(),
        FailureKind::CheckViolation
    );
}

#[tokio::test]
async fn test_enroll_unknown_student_is_foreign_key_violation() {
    let repo = new_repo().await;
    repo.add_course(&Course::new("CS101", "Intro", 30))
        .await
        .expect("Failed to save course");

    let err = repo
        .enroll(&Enrollment::new("S404", "CS101"))
        .await
        .unwrap_err();

    let integrity = err.as_integrity().expect("integrity error");
    assert_eq!(
        integrity.cause().unwrap().kind(),
        FailureKind::ForeignKeyViolation
    );
    assert_eq!(
        integrity.message(),
        "cannot enroll S404 in CS101: student or course does not exist"
    );
}

#[tokio::test]
async fn test_syntax_error_is_not_integrity() {
    let repo = new_repo().await;

    let sqlx_err = sqlx::query("SELEC 1")
        .execute(repo.pool())
        .await
        .expect_err("malformed SQL must fail");
    let err = classify(sqlx_err, |_| "unused".to_string());

    match err {
        StorageError::Infrastructure(failure) => {
            assert_eq!(failure.kind(), FailureKind::Syntax);
        }
        other => panic!("expected infrastructure failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_closed_pool_is_connection_lost() {
    let repo = new_repo().await;
    repo.close().await;

    let err = repo.get_student("S1").await.unwrap_err();

    assert!(!err.is_integrity());
    assert!(err.is_retryable());
}

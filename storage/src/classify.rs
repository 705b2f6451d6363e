//! Translates sqlx errors into the storage error taxonomy.
//!
//! The driver's own [`sqlx::error::ErrorKind`] is trusted first; SQLite result codes and message
//! prefixes are the fallback for anything it reports as `Other`.

use ccrms_core::{DriverFailure, FailureKind, StorageError};
use sqlx::error::ErrorKind;
use tracing::debug;

// SQLite (extended) result codes.
const SQLITE_BUSY: &str = "5";
const SQLITE_LOCKED: &str = "6";
const SQLITE_CONSTRAINT_CHECK: &str = "275";
const SQLITE_CONSTRAINT_FOREIGNKEY: &str = "787";
const SQLITE_CONSTRAINT_NOTNULL: &str = "1299";
const SQLITE_CONSTRAINT_PRIMARYKEY: &str = "1555";
const SQLITE_CONSTRAINT_UNIQUE: &str = "2067";

/// Classifies a failed sqlx call: constraint failures become an integrity error described by
/// `describe`, everything else is returned as an infrastructure failure.
pub fn classify<F>(err: sqlx::Error, describe: F) -> StorageError
where
    F: FnOnce(&DriverFailure) -> String,
{
    let failure = driver_failure(&err);
    debug!(
        error = %err,
        kind = %failure.kind(),
        code = ?failure.code(),
        "classified storage failure"
    );
    StorageError::classify(failure, describe)
}

/// Snapshot of a sqlx error as a [`DriverFailure`], keeping the vendor code and message.
pub fn driver_failure(err: &sqlx::Error) -> DriverFailure {
    match err {
        sqlx::Error::Database(db) => {
            let code = db.code().map(|c| c.into_owned());
            let kind = match db.kind() {
                ErrorKind::UniqueViolation => FailureKind::UniqueViolation,
                ErrorKind::ForeignKeyViolation => FailureKind::ForeignKeyViolation,
                ErrorKind::NotNullViolation => FailureKind::NotNullViolation,
                ErrorKind::CheckViolation => FailureKind::CheckViolation,
                _ => kind_from_signature(code.as_deref(), db.message()),
            };
            let failure = DriverFailure::new(kind, db.message());
            match code {
                Some(code) => failure.with_code(code),
                None => failure,
            }
        }
        sqlx::Error::PoolTimedOut => DriverFailure::new(FailureKind::Timeout, err.to_string()),
        sqlx::Error::Io(_) | sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed => {
            DriverFailure::new(FailureKind::ConnectionLost, err.to_string())
        }
        _ => DriverFailure::new(FailureKind::Other, err.to_string()),
    }
}

fn kind_from_signature(code: Option<&str>, message: &str) -> FailureKind {
    match code {
        Some(SQLITE_CONSTRAINT_UNIQUE | SQLITE_CONSTRAINT_PRIMARYKEY) => {
            FailureKind::UniqueViolation
        }
        Some(SQLITE_CONSTRAINT_FOREIGNKEY) => FailureKind::ForeignKeyViolation,
        Some(SQLITE_CONSTRAINT_NOTNULL) => FailureKind::NotNullViolation,
        Some(SQLITE_CONSTRAINT_CHECK) => FailureKind::CheckViolation,
        Some(SQLITE_BUSY | SQLITE_LOCKED) => FailureKind::Busy,
        _ if message.starts_with("UNIQUE constraint failed") => FailureKind::UniqueViolation,
        _ if message.starts_with("FOREIGN KEY constraint failed") => {
            FailureKind::ForeignKeyViolation
        }
        _ if message.starts_with("NOT NULL constraint failed") => FailureKind::NotNullViolation,
        _ if message.starts_with("CHECK constraint failed") => FailureKind::CheckViolation,
        _ if message.contains("syntax error") => FailureKind::Syntax,
        _ if message.contains("database is locked") => FailureKind::Busy,
        _ => FailureKind::Other,
    }
}

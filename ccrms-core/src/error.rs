//! Storage error taxonomy.
//!
//! Every persistence call returns [`StorageError`], which is either an [`IntegrityError`]
//! (the request can never succeed as submitted) or an infrastructure [`DriverFailure`]
//! (the storage engine could not do its job). Retry logic looks only at the latter.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Used when a caller hands an empty description to [`IntegrityError`].
pub const DEFAULT_INTEGRITY_MESSAGE: &str = "data integrity violation";

/// Signal reported by the storage driver, reduced to what classification needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    UniqueViolation,
    ForeignKeyViolation,
    NotNullViolation,
    CheckViolation,
    ConnectionLost,
    Timeout,
    Busy,
    Syntax,
    Other,
}

impl FailureKind {
    /// Constraint, uniqueness and referential failures.
    pub fn is_integrity(self) -> bool {
        matches!(
            self,
            Self::UniqueViolation
                | Self::ForeignKeyViolation
                | Self::NotNullViolation
                | Self::CheckViolation
        )
    }

    /// Failures where the identical request may succeed on a later attempt.
    pub fn is_transient(self) -> bool {
        matches!(self, Self::ConnectionLost | Self::Timeout | Self::Busy)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::UniqueViolation => "unique_violation",
            Self::ForeignKeyViolation => "foreign_key_violation",
            Self::NotNullViolation => "not_null_violation",
            Self::CheckViolation => "check_violation",
            Self::ConnectionLost => "connection_lost",
            Self::Timeout => "timeout",
            Self::Busy => "busy",
            Self::Syntax => "syntax",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Low-level failure as the driver reported it: kind, vendor code and vendor message.
///
/// This is the only place driver vocabulary is allowed to live.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{kind}: {message}")]
pub struct DriverFailure {
    kind: FailureKind,
    code: Option<String>,
    message: String,
}

impl DriverFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: None,
            message: message.into(),
        }
    }

    /// Attaches the vendor error code (e.g. SQLite extended result code).
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A persistence operation would break a data invariant.
///
/// `message` is safe to show to end users. `cause` is kept for diagnostics only; callers branch
/// on the fact that they got an `IntegrityError`, never on what is inside `cause`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct IntegrityError {
    message: String,
    #[source]
    cause: Option<DriverFailure>,
}

impl IntegrityError {
    /// Violation detected by application logic, with no driver failure behind it.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: non_empty(message.into()),
            cause: None,
        }
    }

    /// Violation discovered because the storage engine rejected the operation.
    pub fn with_cause(message: impl Into<String>, cause: DriverFailure) -> Self {
        Self {
            message: non_empty(message.into()),
            cause: Some(cause),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&DriverFailure> {
        self.cause.as_ref()
    }
}

fn non_empty(message: String) -> String {
    if message.is_empty() {
        DEFAULT_INTEGRITY_MESSAGE.to_string()
    } else {
        message
    }
}

/// Outcome of a failed persistence call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error(transparent)]
    Integrity(#[from] IntegrityError),

    #[error("Storage failure: {0}")]
    Infrastructure(DriverFailure),
}

impl StorageError {
    /// Wraps constraint failures into an [`IntegrityError`] described by `describe`; every other
    /// failure is passed through as infrastructure, untouched.
    pub fn classify<F>(failure: DriverFailure, describe: F) -> Self
    where
        F: FnOnce(&DriverFailure) -> String,
    {
        if failure.kind().is_integrity() {
            let message = describe(&failure);
            Self::Integrity(IntegrityError::with_cause(message, failure))
        } else {
            Self::Infrastructure(failure)
        }
    }

    pub fn is_integrity(&self) -> bool {
        matches!(self, Self::Integrity(_))
    }

    pub fn as_integrity(&self) -> Option<&IntegrityError> {
        match self {
            Self::Integrity(e) => Some(e),
            Self::Infrastructure(_) => None,
        }
    }

    /// Only transient infrastructure failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Integrity(_) => false,
            Self::Infrastructure(failure) => failure.kind().is_transient(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;

//! # ccrms-core
//!
//! Core types for the course registration records system: the storage error taxonomy
//! ([`IntegrityError`], [`DriverFailure`], [`StorageError`]), request/response types with the
//! [`Handler`] trait, and tracing initialization. Storage-engine agnostic; used by storage,
//! roster-service and ccrms-cli.

pub mod error;
pub mod logger;
pub mod types;

pub use error::{
    DriverFailure, FailureKind, IntegrityError, Result, StorageError, DEFAULT_INTEGRITY_MESSAGE,
};
pub use logger::init_tracing;
pub use types::{Handler, Request, Response};

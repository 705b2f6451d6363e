//! Storage crate: roster persistence on SQLite and the sqlx error adapter.
//!
//! ## Modules
//!
//! - [`classify`] – sqlx error → `StorageError` (integrity vs infrastructure)
//! - [`models`] – Student, Course, Enrollment
//! - [`repository`] – RosterStore trait
//! - [`roster_repo`] – RosterRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

pub mod classify;
mod models;
mod repository;
mod roster_repo;
mod sqlite_pool;

#[cfg(test)]
mod roster_repo_test;

pub use ccrms_core::{DriverFailure, FailureKind, IntegrityError, StorageError};
pub use classify::{classify, driver_failure};
pub use models::{Course, Enrollment, Student};
pub use repository::RosterStore;
pub use roster_repo::RosterRepository;
pub use sqlite_pool::SqlitePoolManager;

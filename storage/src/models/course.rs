//! Course record model for persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Course {
    pub code: String,
    pub title: String,
    /// Maximum number of enrolled students; the schema requires it to be positive.
    pub capacity: i64,
    pub created_at: DateTime<Utc>,
}

impl Course {
    pub fn new(code: impl Into<String>, title: impl Into<String>, capacity: i64) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            capacity,
            created_at: Utc::now(),
        }
    }
}

//! Request/response types shared by the service layer and the CLI, and the [`Handler`] trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A roster change requested by a user or calling service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    AddStudent {
        id: String,
        name: String,
        email: String,
    },
    AddCourse {
        code: String,
        title: String,
        capacity: i64,
    },
    Enroll {
        student_id: String,
        course_code: String,
    },
    Withdraw {
        student_id: String,
        course_code: String,
    },
}

/// What the caller gets back. Text is always safe to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    /// The change was stored.
    Accepted(String),
    /// The change would break a data invariant; the text says which one.
    Rejected(String),
    /// Storage could not complete the request; nothing about the request itself is wrong.
    Failed(String),
}

impl Response {
    pub fn text(&self) -> &str {
        match self {
            Self::Accepted(s) | Self::Rejected(s) | Self::Failed(s) => s,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Terminal handler: turns every outcome, including storage errors, into a [`Response`].
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, request: Request) -> Response;
}

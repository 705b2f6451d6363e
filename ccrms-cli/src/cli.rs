//! CLI parser and config loading.

use anyhow::Result;
use ccrms_core::{Request, Response};
use clap::{Parser, Subcommand};
use roster_service::RosterConfig;

#[derive(Parser, Debug)]
#[command(name = "ccrms")]
#[command(about = "Course registration records CLI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// SQLite database URL; overrides DATABASE_URL.
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Add a student to the roster.
    AddStudent {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Add a course with a seat limit.
    AddCourse {
        #[arg(long)]
        code: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        capacity: i64,
    },
    /// Enroll a student in a course.
    Enroll {
        #[arg(long)]
        student: String,
        #[arg(long)]
        course: String,
    },
    /// Withdraw a student from a course.
    Withdraw {
        #[arg(long)]
        student: String,
        #[arg(long)]
        course: String,
    },
    /// List the students enrolled in a course.
    Roster {
        #[arg(long)]
        course: String,
    },
}

impl Commands {
    /// The write request for this command; `None` for read-only commands.
    pub fn to_request(&self) -> Option<Request> {
        match self {
            Self::AddStudent { id, name, email } => Some(Request::AddStudent {
                id: id.clone(),
                name: name.clone(),
                email: email.clone(),
            }),
            Self::AddCourse {
                code,
                title,
                capacity,
            } => Some(Request::AddCourse {
                code: code.clone(),
                title: title.clone(),
                capacity: *capacity,
            }),
            Self::Enroll { student, course } => Some(Request::Enroll {
                student_id: student.clone(),
                course_code: course.clone(),
            }),
            Self::Withdraw { student, course } => Some(Request::Withdraw {
                student_id: student.clone(),
                course_code: course.clone(),
            }),
            Self::Roster { .. } => None,
        }
    }
}

/// Load RosterConfig from environment. If `database_url` is provided it overrides DATABASE_URL.
pub fn load_config(database_url: Option<String>) -> Result<RosterConfig> {
    RosterConfig::load(database_url)
}

/// Process status: 0 when accepted, 1 when rejected for an integrity reason, 2 when storage failed.
pub fn exit_status(response: &Response) -> u8 {
    match response {
        Response::Accepted(_) => 0,
        Response::Rejected(_) => 1,
        Response::Failed(_) => 2,
    }
}

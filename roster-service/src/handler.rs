//! Request handler: the layer that decides what the caller sees.
//!
//! Integrity errors become [`Response::Rejected`] carrying only the error's message. Infrastructure
//! failures become [`Response::Failed`] with a fixed text. Driver detail goes to the log only.

use async_trait::async_trait;
use ccrms_core::{Handler, IntegrityError, Request, Response, StorageError};
use tracing::{error, info, instrument, warn};

use crate::service::RosterService;

/// Shown to the caller when storage fails for reasons unrelated to the request.
pub const UNAVAILABLE_MESSAGE: &str = "storage is temporarily unavailable, please try again";

#[derive(Clone)]
pub struct RequestHandler {
    service: RosterService,
}

impl RequestHandler {
    pub fn new(service: RosterService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &RosterService {
        &self.service
    }

    async fn dispatch(&self, request: &Request) -> ccrms_core::Result<String> {
        match request {
            Request::AddStudent { id, name, email } => {
                let student = self.service.add_student(id, name, email).await?;
                Ok(format!("student {} added", student.id))
            }
            Request::AddCourse {
                code,
                title,
                capacity,
            } => {
                let course = self.service.add_course(code, title, *capacity).await?;
                Ok(format!(
                    "course {} added with capacity {}",
                    course.code, course.capacity
                ))
            }
            Request::Enroll {
                student_id,
                course_code,
            } => {
                self.service.enroll(student_id, course_code).await?;
                Ok(format!("{} enrolled in {}", student_id, course_code))
            }
            Request::Withdraw {
                student_id,
                course_code,
            } => {
                let removed = self.service.withdraw(student_id, course_code).await?;
                Ok(if removed {
                    format!("{} withdrawn from {}", student_id, course_code)
                } else {
                    format!("{} was not enrolled in {}", student_id, course_code)
                })
            }
        }
    }
}

#[async_trait]
impl Handler for RequestHandler {
    #[instrument(skip(self, request))]
    async fn handle(&self, request: Request) -> Response {
        match self.dispatch(&request).await {
            Ok(text) => {
                info!(request = ?request, "step: request accepted");
                Response::Accepted(text)
            }
            Err(e) => respond_to_error(e),
        }
    }
}

/// Maps a storage error to the caller-facing response, logging it as a single record.
pub fn respond_to_error(err: StorageError) -> Response {
    match err {
        StorageError::Integrity(e) => {
            report_integrity(&e);
            Response::Rejected(e.message().to_string())
        }
        StorageError::Infrastructure(failure) => {
            error!(
                cause_kind = %failure.kind(),
                cause_code = ?failure.code(),
                cause_message = %failure.message(),
                "storage failure, request not completed"
            );
            Response::Failed(UNAVAILABLE_MESSAGE.to_string())
        }
    }
}

fn report_integrity(err: &IntegrityError) {
    match err.cause() {
        Some(cause) => warn!(
            reason = %err.message(),
            cause_kind = %cause.kind(),
            cause_code = ?cause.code(),
            cause_message = %cause.message(),
            "integrity violation, request rejected"
        ),
        None => warn!(reason = %err.message(), "integrity violation, request rejected"),
    }
}

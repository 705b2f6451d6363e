//! # roster-service
//!
//! Service layer over the roster store: configuration, the retry policy applied to storage
//! calls, [`RosterService`] (validation and application rules) and [`RequestHandler`], which
//! turns storage outcomes into caller-facing [`ccrms_core::Response`]s.

pub mod config;
pub mod handler;
pub mod retry;
pub mod service;

pub use config::RosterConfig;
pub use handler::{respond_to_error, RequestHandler, UNAVAILABLE_MESSAGE};
pub use retry::RetryPolicy;
pub use service::RosterService;

use std::sync::Arc;

use storage::RosterRepository;

/// Opens the SQLite roster at `config.database_url` and wires service and handler on top.
pub async fn build_handler(config: &RosterConfig) -> ccrms_core::Result<RequestHandler> {
    let repo = RosterRepository::new(&config.database_url).await?;
    let service = RosterService::new(Arc::new(repo), config.retry_policy());
    Ok(RequestHandler::new(service))
}

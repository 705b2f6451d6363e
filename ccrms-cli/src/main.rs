//! ccrms CLI: add students and courses, enroll, withdraw, list a course roster.
//! Config from env (and `.env`) with an optional `--database-url` override.

use std::process::ExitCode;

use anyhow::{Context, Result};
use ccrms_cli::{exit_status, load_config, Cli, Commands};
use ccrms_core::{init_tracing, Handler, Response};
use clap::Parser;
use roster_service::{build_handler, respond_to_error, RequestHandler};
use tracing::info;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(cli.database_url.clone())?;
    init_tracing(&config.log_file).context("Initialize logging (check LOG_FILE)")?;
    info!(database_url = %config.database_url, "step: ccrms started");

    let handler = build_handler(&config)
        .await
        .with_context(|| format!("Open roster database {}", config.database_url))?;

    let response = match (&cli.command, cli.command.to_request()) {
        (_, Some(request)) => handler.handle(request).await,
        (Commands::Roster { course }, None) => handle_roster(&handler, course).await,
        (command, None) => anyhow::bail!("No handler for {:?}", command),
    };

    println!("{}", response.text());
    Ok(ExitCode::from(exit_status(&response)))
}

/// Prints the roster of `course`; the returned response carries the summary line.
async fn handle_roster(handler: &RequestHandler, course: &str) -> Response {
    let enrollments = match handler.service().roster(course).await {
        Ok(enrollments) => enrollments,
        Err(e) => return respond_to_error(e),
    };

    if enrollments.is_empty() {
        return Response::Accepted(format!("No students enrolled in {}.", course));
    }

    println!("{:<12} {}", "student_id", "enrolled_at");
    println!("{}", "-".repeat(40));
    for e in &enrollments {
        println!(
            "{:<12} {}",
            e.student_id,
            e.enrolled_at.format("%Y-%m-%d %H:%M:%S")
        );
    }

    Response::Accepted(format!(
        "{} student(s) enrolled in {}.",
        enrollments.len(),
        course
    ))
}

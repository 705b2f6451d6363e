use anyhow::{anyhow, Result};
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Roster service configuration, loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    pub database_url: String,
    pub log_file: String,
    /// Extra attempts after a transient storage failure. Integrity errors are never retried.
    pub max_retries: u32,
    /// Base delay between attempts; the n-th retry waits n times this.
    pub retry_backoff: Duration,
}

impl RosterConfig {
    /// Loads configuration from the environment.
    /// `database_url`, when given, overrides `DATABASE_URL`.
    pub fn load(database_url: Option<String>) -> Result<Self> {
        let database_url = database_url.unwrap_or_else(|| {
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:./ccrms.db".to_string())
        });
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/ccrms.log".to_string());
        let max_retries = parse_env("STORAGE_MAX_RETRIES", 1u32)?;
        let backoff_ms = parse_env("STORAGE_RETRY_BACKOFF_MS", 100u64)?;

        Ok(Self {
            database_url,
            log_file,
            max_retries,
            retry_backoff: Duration::from_millis(backoff_ms),
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.retry_backoff)
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{} must be a non-negative integer, got {:?}: {}", key, raw, e)),
        Err(_) => Ok(default),
    }
}

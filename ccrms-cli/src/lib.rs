//! # ccrms-cli
//!
//! CLI foundation: argument parsing, config loading and exit codes for the `ccrms` binary.

pub mod cli;

pub use cli::{exit_status, load_config, Cli, Commands};
pub use roster_service::RosterConfig;

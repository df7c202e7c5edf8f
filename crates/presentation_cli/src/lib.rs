//! Stockholm Direkt CLI
//!
//! Argument definitions and a thin client for the HTTP API.

pub mod cli;
pub mod client;

pub use cli::{Cli, Commands, DEFAULT_SERVER_URL, log_filter_from_verbosity};
pub use client::{ApiClient, CliError};

//! Command-line arguments

use clap::{Parser, Subcommand};

/// Server used when `--url` is not given
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Stockholm Direkt CLI
#[derive(Debug, Parser)]
#[command(name = "direkt-cli")]
#[command(author, version, about = "Stockholm Direkt trip lookup CLI", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Server URL
    #[arg(short, long, env = "DIREKT_URL", default_value = DEFAULT_SERVER_URL, global = true)]
    pub url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check server readiness
    Status,

    /// Search stops by name or address
    Search {
        /// Stop name or street address
        query: String,
    },

    /// List stops around a position
    Nearby {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Search radius in meters
        #[arg(short, long)]
        radius: Option<u32>,
    },

    /// Resolve a stop name to its site id
    Resolve {
        /// Stop name
        name: String,
    },

    /// Find trips from a position to a destination stop
    Trips {
        /// Destination stop name
        destination: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// Send a message through the contact form relay
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },

    /// Great-circle distance between two positions (no server needed)
    Distance {
        #[arg(allow_hyphen_values = true)]
        lat1: f64,
        #[arg(allow_hyphen_values = true)]
        lon1: f64,
        #[arg(allow_hyphen_values = true)]
        lat2: f64,
        #[arg(allow_hyphen_values = true)]
        lon2: f64,
    },
}

/// Determine log filter level from verbosity count
#[must_use]
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

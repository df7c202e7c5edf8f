//! Application configuration
//!
//! Split into focused sub-modules by domain:
//! - `server`: HTTP server settings
//! - `integrations`: journey planner, geocoding, contact mail
//! - `search`: stop search, autocomplete and trip lookup tunables
//!
//! Sources are layered: built-in defaults, an optional `config.toml`, then
//! `DIREKT_*` environment variables (`DIREKT_SERVER__PORT=8080`). The
//! variables `CONTACT_EMAIL`, `RESEND_API_KEY` and `RESEND_FROM_EMAIL` are
//! honoured last.

mod integrations;
mod search;
mod server;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub use integrations::{ContactAppConfig, GeocodingAppConfig, JourneyPlannerAppConfig};
pub use search::{SearchAppConfig, TripsAppConfig};
pub use server::{LogFormat, ServerConfig};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "DIREKT";

/// Recipient override
pub const CONTACT_EMAIL_VAR: &str = "CONTACT_EMAIL";
/// Resend API key override
pub const RESEND_API_KEY_VAR: &str = "RESEND_API_KEY";
/// Sender address override
pub const RESEND_FROM_EMAIL_VAR: &str = "RESEND_FROM_EMAIL";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
///
/// Controls how much internal detail error responses carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - error details are exposed
    #[default]
    Development,
    /// Production environment - error details are hidden
    Production,
}

impl Environment {
    /// Whether internal error details may be shown to clients
    #[must_use]
    pub const fn exposes_error_details(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// SL Journey-planner configuration
    #[serde(default)]
    pub journey_planner: JourneyPlannerAppConfig,

    /// Nominatim geocoding configuration
    #[serde(default)]
    pub geocoding: GeocodingAppConfig,

    /// Stop search and autocomplete configuration
    #[serde(default)]
    pub search: SearchAppConfig,

    /// Trip lookup configuration
    #[serde(default)]
    pub trips: TripsAppConfig,

    /// Contact relay configuration
    #[serde(default)]
    pub contact: ContactAppConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or a value has the wrong
    /// type.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the given file stem and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or a value has the wrong
    /// type.
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            // Load from file if exists
            .add_source(config::File::with_name(file).required(false))
            // Override with environment variables (e.g., DIREKT_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_legacy_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Apply `CONTACT_EMAIL`, `RESEND_API_KEY` and `RESEND_FROM_EMAIL`
    ///
    /// Blank values are ignored.
    pub fn apply_legacy_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(recipient) = lookup(CONTACT_EMAIL_VAR) {
            debug!(var = CONTACT_EMAIL_VAR, "Applying legacy override");
            self.contact.recipient = Some(recipient);
        }

        if let Some(key) = lookup(RESEND_API_KEY_VAR) {
            debug!(var = RESEND_API_KEY_VAR, "Applying legacy override");
            self.contact.resend_api_key = Some(SecretString::from(key));
        }

        if let Some(from) = lookup(RESEND_FROM_EMAIL_VAR) {
            debug!(var = RESEND_FROM_EMAIL_VAR, "Applying legacy override");
            self.contact.from_address = from;
        }
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first problem found, prefixed with its section.
    pub fn validate(&self) -> Result<(), String> {
        self.journey_planner
            .to_client_config()
            .validate()
            .map_err(|e| format!("journey_planner: {e}"))?;
        self.geocoding
            .to_nominatim_config()
            .validate()
            .map_err(|e| format!("geocoding: {e}"))?;
        self.search
            .validate()
            .map_err(|e| format!("search: {e}"))?;
        self.trips.validate().map_err(|e| format!("trips: {e}"))?;
        if let Some(resend) = self.contact.to_resend_config() {
            resend.validate().map_err(|e| format!("contact: {e}"))?;
        }
        self.contact
            .to_contact_settings()
            .map_err(|e| format!("contact: {e}"))?;
        Ok(())
    }
}

//! Journey planner configuration

use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest trip count the journey planner accepts per request
pub const MAX_TRIPS_PER_REQUEST: u8 = 10;

/// Configuration for the SL Journey-planner v2 client
#[derive(Clone, Serialize, Deserialize)]
pub struct JourneyPlannerConfig {
    /// Base URL of the journey planner API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional API key, sent as the `key` query parameter
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum stops returned by a nearby search
    #[serde(default = "default_max_nearby_results")]
    pub max_nearby_results: u8,
}

fn default_base_url() -> String {
    "https://journeyplanner.integration.sl.se/v2".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_max_nearby_results() -> u8 {
    10
}

impl Default for JourneyPlannerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            max_nearby_results: default_max_nearby_results(),
        }
    }
}

impl fmt::Debug for JourneyPlannerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JourneyPlannerConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("max_nearby_results", &self.max_nearby_results)
            .finish()
    }
}

impl JourneyPlannerConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Point the client at another base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.max_nearby_results == 0 {
            return Err("max_nearby_results must be greater than 0".to_string());
        }

        Ok(())
    }
}

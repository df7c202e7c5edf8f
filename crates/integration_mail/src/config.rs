//! Resend client configuration

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sender address usable without a verified domain
pub const DEFAULT_FROM_ADDRESS: &str = "onboarding@resend.dev";

/// Configuration for the Resend client
#[derive(Clone, Serialize, Deserialize)]
pub struct ResendConfig {
    /// Base URL of the Resend API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as bearer token
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.resend.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for ResendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for ResendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResendConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ResendConfig {
    /// Configuration with the given key and default endpoint
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Point the client at another base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: "re_test".to_string(),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error message if a field is missing or out of range.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.api_key.trim().is_empty() {
            return Err("api_key must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ResendConfig::default();
        assert_eq!(config.base_url, "https://api.resend.com");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn validate() {
        assert!(ResendConfig::for_testing().validate().is_ok());
        assert!(ResendConfig::default().validate().is_err());
    }

    #[test]
    fn debug_redacts_key() {
        let config = ResendConfig::with_api_key("re_live_123");
        let debug = format!("{config:?}");
        assert!(!debug.contains("re_live_123"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn key_is_not_serialized() {
        let config = ResendConfig::with_api_key("re_live_123");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("re_live_123"));
    }
}

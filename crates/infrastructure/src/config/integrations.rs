//! Integration configurations: journey planner, geocoding, contact mail.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

// ==============================
// Journey Planner Configuration
// ==============================

/// SL Journey-planner v2 configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct JourneyPlannerAppConfig {
    /// Base URL of the journey planner
    #[serde(default = "default_journey_planner_base_url")]
    pub base_url: String,

    /// Optional API key (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_journey_planner_timeout")]
    pub timeout_secs: u64,

    /// Maximum stops per nearby search (default: 10)
    #[serde(default = "default_max_nearby_results")]
    pub max_nearby_results: u8,
}

fn default_journey_planner_base_url() -> String {
    "https://journeyplanner.integration.sl.se/v2".to_string()
}

const fn default_journey_planner_timeout() -> u64 {
    10
}

const fn default_max_nearby_results() -> u8 {
    10
}

impl Default for JourneyPlannerAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_journey_planner_base_url(),
            api_key: None,
            timeout_secs: default_journey_planner_timeout(),
            max_nearby_results: default_max_nearby_results(),
        }
    }
}

impl fmt::Debug for JourneyPlannerAppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JourneyPlannerAppConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("max_nearby_results", &self.max_nearby_results)
            .finish()
    }
}

impl JourneyPlannerAppConfig {
    /// Convert to `integration_transit::JourneyPlannerConfig`
    #[must_use]
    pub fn to_client_config(&self) -> integration_transit::JourneyPlannerConfig {
        integration_transit::JourneyPlannerConfig {
            base_url: self.base_url.clone(),
            api_key: self
                .api_key
                .as_ref()
                .map(|key| key.expose_secret().to_string()),
            timeout_secs: self.timeout_secs,
            max_nearby_results: self.max_nearby_results,
        }
    }
}

// ==============================
// Geocoding Configuration
// ==============================

/// Nominatim geocoding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingAppConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 5)
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_secs: u64,

    /// Cache TTL in hours, 0 disables the cache (default: 24)
    #[serde(default = "default_geocoding_cache_ttl")]
    pub cache_ttl_hours: u64,

    /// Country code filter (default: "se")
    #[serde(default = "default_country_filter")]
    pub country_filter: String,

    /// Minimum spacing between requests in milliseconds (default: 1100)
    #[serde(default = "default_min_request_interval_ms")]
    pub min_request_interval_ms: u64,
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_geocoding_timeout() -> u64 {
    5
}

const fn default_geocoding_cache_ttl() -> u64 {
    24
}

fn default_country_filter() -> String {
    "se".to_string()
}

const fn default_min_request_interval_ms() -> u64 {
    1100
}

impl Default for GeocodingAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout(),
            cache_ttl_hours: default_geocoding_cache_ttl(),
            country_filter: default_country_filter(),
            min_request_interval_ms: default_min_request_interval_ms(),
        }
    }
}

impl GeocodingAppConfig {
    /// Convert to `integration_transit::NominatimConfig`
    #[must_use]
    pub fn to_nominatim_config(&self) -> integration_transit::NominatimConfig {
        integration_transit::NominatimConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            cache_ttl_hours: self.cache_ttl_hours,
            country_filter: self.country_filter.clone(),
            min_request_interval_ms: self.min_request_interval_ms,
        }
    }
}

// ==============================
// Contact Mail Configuration
// ==============================

/// Contact form relay configuration (Resend)
#[derive(Clone, Serialize, Deserialize)]
pub struct ContactAppConfig {
    /// Where contact messages are delivered; relay is disabled without it
    #[serde(default)]
    pub recipient: Option<String>,

    /// Sender address, must be verified with Resend
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// Resend API key (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub resend_api_key: Option<SecretString>,

    /// Resend API base URL
    #[serde(default = "default_resend_base_url")]
    pub resend_base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_resend_timeout")]
    pub timeout_secs: u64,
}

fn default_from_address() -> String {
    integration_mail::DEFAULT_FROM_ADDRESS.to_string()
}

fn default_resend_base_url() -> String {
    "https://api.resend.com".to_string()
}

const fn default_resend_timeout() -> u64 {
    10
}

impl Default for ContactAppConfig {
    fn default() -> Self {
        Self {
            recipient: None,
            from_address: default_from_address(),
            resend_api_key: None,
            resend_base_url: default_resend_base_url(),
            timeout_secs: default_resend_timeout(),
        }
    }
}

impl fmt::Debug for ContactAppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactAppConfig")
            .field("recipient", &self.recipient)
            .field("from_address", &self.from_address)
            .field(
                "resend_api_key",
                &self.resend_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("resend_base_url", &self.resend_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ContactAppConfig {
    /// Resend client configuration, if an API key is set
    #[must_use]
    pub fn to_resend_config(&self) -> Option<integration_mail::ResendConfig> {
        let key = self.resend_api_key.as_ref()?.expose_secret();
        if key.trim().is_empty() {
            return None;
        }

        Some(integration_mail::ResendConfig {
            base_url: self.resend_base_url.clone(),
            api_key: key.to_string(),
            timeout_secs: self.timeout_secs,
        })
    }

    /// Recipient and sender for the contact service
    ///
    /// An unset or blank recipient leaves the relay unconfigured.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipient is not a valid email address.
    pub fn to_contact_settings(
        &self,
    ) -> Result<application::services::ContactSettings, domain::DomainError> {
        let recipient = self
            .recipient
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(domain::EmailAddress::new)
            .transpose()?;

        Ok(application::services::ContactSettings {
            recipient,
            from_address: self.from_address.clone(),
        })
    }
}

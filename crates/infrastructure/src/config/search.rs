//! Stop search, autocomplete and trip lookup tunables.

use application::services::{
    AutocompleteConfig, DEFAULT_SUGGESTIONS, MAX_TRIP_COUNT, StopSearchConfig, TripSearchConfig,
};
use serde::{Deserialize, Serialize};

/// Stop search and autocomplete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchAppConfig {
    /// Appended to the query for the first geocoding attempt
    #[serde(default = "default_city_qualifier")]
    pub city_qualifier: String,

    /// Radius around a geocoded address in meters (default: 2000)
    #[serde(default = "default_address_radius")]
    pub address_radius_meters: u32,

    /// Radius for nearby lookups without an explicit radius (default: 1000)
    #[serde(default = "default_nearby_radius")]
    pub default_nearby_radius_meters: u32,

    /// Maximum candidates per search (default: 5)
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,

    /// Queries offered when nothing is found
    #[serde(default = "default_suggestions")]
    pub suggestions: Vec<String>,

    /// Autocomplete: minimum query length (default: 2)
    #[serde(default = "default_autocomplete_min_chars")]
    pub autocomplete_min_chars: usize,

    /// Autocomplete: debounce in milliseconds (default: 300)
    #[serde(default = "default_autocomplete_debounce_ms")]
    pub autocomplete_debounce_ms: u64,

    /// Autocomplete: maximum suggestions (default: 8)
    #[serde(default = "default_autocomplete_max_results")]
    pub autocomplete_max_results: usize,

    /// Autocomplete: tracked sessions before idle ones are pruned
    #[serde(default = "default_autocomplete_max_sessions")]
    pub autocomplete_max_sessions: usize,
}

fn default_city_qualifier() -> String {
    "Stockholm".to_string()
}

const fn default_address_radius() -> u32 {
    2000
}

const fn default_nearby_radius() -> u32 {
    1000
}

const fn default_max_candidates() -> usize {
    5
}

fn default_suggestions() -> Vec<String> {
    DEFAULT_SUGGESTIONS.iter().map(ToString::to_string).collect()
}

const fn default_autocomplete_min_chars() -> usize {
    2
}

const fn default_autocomplete_debounce_ms() -> u64 {
    300
}

const fn default_autocomplete_max_results() -> usize {
    8
}

const fn default_autocomplete_max_sessions() -> usize {
    1024
}

impl Default for SearchAppConfig {
    fn default() -> Self {
        Self {
            city_qualifier: default_city_qualifier(),
            address_radius_meters: default_address_radius(),
            default_nearby_radius_meters: default_nearby_radius(),
            max_candidates: default_max_candidates(),
            suggestions: default_suggestions(),
            autocomplete_min_chars: default_autocomplete_min_chars(),
            autocomplete_debounce_ms: default_autocomplete_debounce_ms(),
            autocomplete_max_results: default_autocomplete_max_results(),
            autocomplete_max_sessions: default_autocomplete_max_sessions(),
        }
    }
}

impl SearchAppConfig {
    /// Settings for the fallback orchestrator
    #[must_use]
    pub fn to_stop_search_config(&self) -> StopSearchConfig {
        StopSearchConfig {
            city_qualifier: self.city_qualifier.clone(),
            address_radius_meters: self.address_radius_meters,
            default_nearby_radius_meters: self.default_nearby_radius_meters,
            max_candidates: self.max_candidates,
            suggestions: self.suggestions.clone(),
        }
    }

    /// Settings for the autocomplete service
    #[must_use]
    pub const fn to_autocomplete_config(&self) -> AutocompleteConfig {
        AutocompleteConfig {
            min_query_chars: self.autocomplete_min_chars,
            debounce_ms: self.autocomplete_debounce_ms,
            max_results: self.autocomplete_max_results,
            max_sessions: self.autocomplete_max_sessions,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error message if a radius or limit is zero.
    pub fn validate(&self) -> Result<(), String> {
        if self.address_radius_meters == 0 || self.default_nearby_radius_meters == 0 {
            return Err("search radii must be greater than 0".to_string());
        }

        if self.max_candidates == 0 || self.autocomplete_max_results == 0 {
            return Err("result limits must be greater than 0".to_string());
        }

        if self.autocomplete_max_sessions == 0 {
            return Err("autocomplete_max_sessions must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Trip lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripsAppConfig {
    /// Seconds allowed for obtaining the traveller's position (default: 10)
    #[serde(default = "default_geolocation_timeout")]
    pub geolocation_timeout_secs: u64,

    /// Trips requested per lookup, at most 10 (default: 3)
    #[serde(default = "default_trip_count")]
    pub trip_count: u8,
}

const fn default_geolocation_timeout() -> u64 {
    10
}

const fn default_trip_count() -> u8 {
    3
}

impl Default for TripsAppConfig {
    fn default() -> Self {
        Self {
            geolocation_timeout_secs: default_geolocation_timeout(),
            trip_count: default_trip_count(),
        }
    }
}

impl TripsAppConfig {
    /// Settings for the trip lookup service
    #[must_use]
    pub const fn to_trip_search_config(&self) -> TripSearchConfig {
        TripSearchConfig {
            geolocation_timeout_secs: self.geolocation_timeout_secs,
            trip_count: self.trip_count,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error message if the trip count is outside 1..=10 or the
    /// timeout is zero.
    pub fn validate(&self) -> Result<(), String> {
        if self.trip_count == 0 || self.trip_count > MAX_TRIP_COUNT {
            return Err(format!("trip_count must be between 1 and {MAX_TRIP_COUNT}"));
        }

        if self.geolocation_timeout_secs == 0 {
            return Err("geolocation_timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

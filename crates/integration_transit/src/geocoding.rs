//! Address lookup through Nominatim (OpenStreetMap)
//!
//! Used as the second step of the stop search fallback chain: when the
//! journey planner knows nothing about a query, the query is turned into a
//! coordinate here and the nearest stops are looked up from that point.
//!
//! Upstream requests are spaced out as the Nominatim usage policy asks and
//! successful lookups are kept in a TTL cache keyed by the lowercased
//! address. Misses are never cached.

use std::time::Duration;

use async_trait::async_trait;
use domain::GeoLocation;
use moka::future::Cache;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

const SEARCH_LANGUAGES: &str = "sv,en";
const CACHE_CAPACITY: u64 = 1_000;

/// Settings for [`NominatimGeocodingClient`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Service root, without the `/search` suffix
    #[serde(default = "NominatimConfig::default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "NominatimConfig::default_timeout_secs")]
    pub timeout_secs: u64,

    /// How long a resolved address stays cached; 0 turns the cache off
    #[serde(default = "NominatimConfig::default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,

    /// Value of the `countrycodes` parameter; empty searches worldwide
    #[serde(default = "NominatimConfig::default_country_filter")]
    pub country_filter: String,

    /// Minimum gap between two upstream requests in milliseconds
    #[serde(default = "NominatimConfig::default_min_request_interval_ms")]
    pub min_request_interval_ms: u64,
}

impl NominatimConfig {
    fn default_base_url() -> String {
        "https://nominatim.openstreetmap.org".to_owned()
    }

    const fn default_timeout_secs() -> u64 {
        5
    }

    const fn default_cache_ttl_hours() -> u64 {
        24
    }

    fn default_country_filter() -> String {
        "se".to_owned()
    }

    const fn default_min_request_interval_ms() -> u64 {
        1100
    }

    /// No cache and no request spacing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            cache_ttl_hours: 0,
            min_request_interval_ms: 0,
            ..Self::default()
        }
    }

    /// Same settings against another host
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Check the values that would make the client unusable
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending field.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_owned());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_owned());
        }
        Ok(())
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url.trim_end_matches('/'))
    }

    fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_ttl_hours > 0).then(|| Duration::from_secs(self.cache_ttl_hours * 3600))
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout_secs: Self::default_timeout_secs(),
            cache_ttl_hours: Self::default_cache_ttl_hours(),
            country_filter: Self::default_country_filter(),
            min_request_interval_ms: Self::default_min_request_interval_ms(),
        }
    }
}

/// Failures of an address lookup
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// The service could not be reached
    #[error("Geocoder unreachable: {0}")]
    ConnectionFailed(String),

    /// Non-success status other than 429
    #[error("Geocoder returned an error: {0}")]
    RequestFailed(String),

    /// Body was not the expected JSON array
    #[error("Unreadable geocoder response: {0}")]
    ParseError(String),

    /// Zero hits for the address
    #[error("No match for address: {0}")]
    AddressNotFound(String),

    /// Upstream answered 429
    #[error("Geocoder rate limit exceeded")]
    RateLimitExceeded,

    /// No answer within the configured timeout
    #[error("Geocoder request timed out")]
    Timeout,
}

impl From<reqwest::Error> for GeocodingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::ConnectionFailed(err.to_string())
        }
    }
}

/// Turns a free-form address into a coordinate
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Best match for `address`
    async fn geocode(&self, address: &str) -> Result<GeoLocation, GeocodingError>;
}

/// Enforces a minimum gap between consecutive upstream calls
#[derive(Debug)]
struct RequestSpacing {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl RequestSpacing {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Mutex::new(None),
        }
    }

    /// Wait until the next request may go out, then claim the slot
    async fn acquire(&self) {
        let mut last = self.last.lock().await;
        if let Some(previous) = *last {
            let wait = self.interval.saturating_sub(previous.elapsed());
            if !wait.is_zero() {
                debug!(?wait, "Delaying geocoder request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// [`GeocodingClient`] backed by the public Nominatim API
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    http: Client,
    config: NominatimConfig,
    resolved: Option<Cache<String, GeoLocation>>,
    spacing: RequestSpacing,
}

impl NominatimGeocodingClient {
    /// Build the client and its cache
    ///
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be constructed.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("StockholmDirekt/1.0")
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        let resolved = config.cache_ttl().map(|ttl| {
            Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(ttl)
                .build()
        });

        Ok(Self {
            http,
            config: config.clone(),
            resolved,
            spacing: RequestSpacing::new(Duration::from_millis(config.min_request_interval_ms)),
        })
    }

    async fn cached(&self, key: &str) -> Option<GeoLocation> {
        match &self.resolved {
            Some(cache) => cache.get(key).await,
            None => None,
        }
    }

    async fn query_upstream(&self, address: &str) -> Result<Vec<NominatimPlace>, GeocodingError> {
        let mut params = vec![
            ("q", address),
            ("format", "jsonv2"),
            ("limit", "1"),
            ("accept-language", SEARCH_LANGUAGES),
        ];
        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.as_str()));
        }

        self.spacing.acquire().await;
        let response = self
            .http
            .get(self.config.search_url())
            .query(&params)
            .send()
            .await?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => Err(GeocodingError::RateLimitExceeded),
            status if !status.is_success() => {
                Err(GeocodingError::RequestFailed(format!("HTTP {status}")))
            },
            _ => Ok(response.json().await?),
        }
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<GeoLocation, GeocodingError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodingError::AddressNotFound(
                "empty address".to_owned(),
            ));
        }

        let key = address.to_lowercase();
        if let Some(location) = self.cached(&key).await {
            debug!(%location, "Address served from cache");
            return Ok(location);
        }

        let place = self
            .query_upstream(address)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| GeocodingError::AddressNotFound(address.to_owned()))?;
        let location = place.location()?;

        if let Some(cache) = &self.resolved {
            cache.insert(key, location).await;
        }
        debug!(%location, label = place.display_name.as_deref(), "Address resolved");

        Ok(location)
    }
}

/// One hit of the `/search` endpoint; coordinates arrive as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl NominatimPlace {
    fn location(&self) -> Result<GeoLocation, GeocodingError> {
        let parse = |raw: &str, axis: &str| {
            raw.trim()
                .parse::<f64>()
                .map_err(|_| GeocodingError::ParseError(format!("{axis} is not a number: {raw}")))
        };
        let lat = parse(&self.lat, "lat")?;
        let lon = parse(&self.lon, "lon")?;

        GeoLocation::new(lat, lon).map_err(|e| GeocodingError::ParseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_usage_policy() {
        let config = NominatimConfig::default();
        assert_eq!(config.search_url(), "https://nominatim.openstreetmap.org/search");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.country_filter, "se");
        assert_eq!(config.min_request_interval_ms, 1100);
        assert_eq!(config.cache_ttl(), Some(Duration::from_secs(24 * 3600)));
    }

    #[test]
    fn testing_config_disables_cache_and_spacing() {
        let config = NominatimConfig::for_testing();
        assert_eq!(config.cache_ttl(), None);
        assert_eq!(config.min_request_interval_ms, 0);
    }

    #[test]
    fn search_url_ignores_trailing_slash() {
        let config = NominatimConfig::for_testing().with_base_url("http://localhost:8080/");
        assert_eq!(config.search_url(), "http://localhost:8080/search");
    }

    #[test]
    fn validate_rejects_zero_timeout_and_blank_url() {
        assert!(NominatimConfig::default().validate().is_ok());

        let zero_timeout = NominatimConfig {
            timeout_secs: 0,
            ..NominatimConfig::default()
        };
        assert!(zero_timeout.validate().is_err());

        let blank = NominatimConfig::default().with_base_url("  ");
        assert!(blank.validate().is_err());
    }

    #[test]
    fn error_messages_carry_the_address() {
        let err = GeocodingError::AddressNotFound("Götgatan 12".to_owned());
        assert!(err.to_string().contains("Götgatan 12"));
        assert!(GeocodingError::Timeout.to_string().contains("timed out"));
    }

    #[test]
    fn place_parses_string_coordinates() {
        let json = r#"[{"lat": "59.3145", "lon": "18.0735", "display_name": "Götgatan, Södermalm"}]"#;
        let places: Vec<NominatimPlace> = serde_json::from_str(json).unwrap();
        assert_eq!(places[0].display_name.as_deref(), Some("Götgatan, Södermalm"));

        let location = places[0].location().unwrap();
        assert!((location.latitude() - 59.3145).abs() < 1e-9);
        assert!((location.longitude() - 18.0735).abs() < 1e-9);
    }

    #[test]
    fn place_without_label_still_parses() {
        let places: Vec<NominatimPlace> =
            serde_json::from_str(r#"[{"lat": "59.0", "lon": "18.0"}]"#).unwrap();
        assert!(places[0].display_name.is_none());
        assert!(places[0].location().is_ok());
    }

    #[test]
    fn place_with_garbage_coordinates_is_parse_error() {
        let place = NominatimPlace {
            lat: "north".to_owned(),
            lon: "18.0".to_owned(),
            display_name: None,
        };
        assert!(matches!(place.location(), Err(GeocodingError::ParseError(_))));

        let out_of_range = NominatimPlace {
            lat: "95.0".to_owned(),
            lon: "18.0".to_owned(),
            display_name: None,
        };
        assert!(matches!(
            out_of_range.location(),
            Err(GeocodingError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn blank_address_never_hits_the_network() {
        let config = NominatimConfig::for_testing().with_base_url("http://127.0.0.1:1");
        let client = NominatimGeocodingClient::new(&config).unwrap();
        let result = client.geocode("  ").await;
        assert!(matches!(result, Err(GeocodingError::AddressNotFound(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn spacing_delays_second_request() {
        let spacing = RequestSpacing::new(Duration::from_millis(1100));
        let start = Instant::now();
        spacing.acquire().await;
        spacing.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(1100));
    }
}

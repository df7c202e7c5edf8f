//! SL Journey-planner v2 client
//!
//! Provides text stop search, coordinate-based nearby-stop lookup, cached
//! site-id resolution and trip search against the `stop-finder` and `trips`
//! endpoints.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::{GeoLocation, Stop, StopId, Trip};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::{JourneyPlannerConfig, MAX_TRIPS_PER_REQUEST};
use crate::error::TransitError;
use crate::models::{StopFinderResponse, TripsResponse};
use crate::site_id_cache::SiteIdCache;

/// Object filter bitmask sent as `any_obj_filter_sf`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectFilter {
    /// Stops only
    Stops,
    /// Stops, streets and points of interest
    StopsStreetsAndPois,
}

impl ObjectFilter {
    /// Wire value of the filter
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Stops => "2",
            Self::StopsStreetsAndPois => "46",
        }
    }
}

/// Trait for journey planner clients
#[async_trait]
pub trait JourneyPlannerClient: Send + Sync {
    /// Free-text location search
    async fn find_stops(&self, query: &str, filter: ObjectFilter)
    -> Result<Vec<Stop>, TransitError>;

    /// Stops around a coordinate, in upstream order
    ///
    /// Fails with [`TransitError::NoNearbyStops`] when nothing is within
    /// `radius_meters`.
    async fn find_nearby_stops(
        &self,
        location: &GeoLocation,
        radius_meters: u32,
    ) -> Result<Vec<Stop>, TransitError>;

    /// Stop id for a destination name, memoized per literal name
    async fn resolve_site_id(&self, name: &str) -> Result<StopId, TransitError>;

    /// Trips from a coordinate to a stop id; an empty list is not an error
    async fn search_trips(
        &self,
        origin: &GeoLocation,
        destination: &StopId,
        count: u8,
    ) -> Result<Vec<Trip>, TransitError>;

    /// Check if the journey planner is reachable
    async fn is_healthy(&self) -> bool;
}

/// Journey planner client for the SL v2 API
#[derive(Debug)]
pub struct SlJourneyPlannerClient {
    client: Client,
    config: JourneyPlannerConfig,
    site_ids: Arc<SiteIdCache>,
}

impl SlJourneyPlannerClient {
    /// Create a new client sharing the given site-id cache
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(
        config: &JourneyPlannerConfig,
        site_ids: Arc<SiteIdCache>,
    ) -> Result<Self, TransitError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("StockholmDirekt/1.0")
            .build()
            .map_err(|e| TransitError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            site_ids,
        })
    }

    /// The cache this client memoizes site ids in
    #[must_use]
    pub fn site_id_cache(&self) -> &Arc<SiteIdCache> {
        &self.site_ids
    }

    /// GET `{base_url}/{endpoint}` and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<T, TransitError> {
        let url = format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'));

        if let Some(key) = &self.config.api_key {
            params.push(("key", key.clone()));
        }

        debug!(?url, "Calling journey planner");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransitError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    TransitError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TransitError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(TransitError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransitError::ParseError(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| TransitError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl JourneyPlannerClient for SlJourneyPlannerClient {
    #[instrument(skip(self))]
    async fn find_stops(
        &self,
        query: &str,
        filter: ObjectFilter,
    ) -> Result<Vec<Stop>, TransitError> {
        if query.trim().is_empty() {
            return Err(TransitError::InvalidQuery(
                "Search query must not be empty".to_string(),
            ));
        }

        let params = vec![
            ("name_sf", query.to_string()),
            ("any_obj_filter_sf", filter.as_param().to_string()),
            ("type_sf", "any".to_string()),
        ];

        let stops = self
            .get_json::<StopFinderResponse>("stop-finder", params)
            .await?
            .into_stops();

        debug!(count = stops.len(), "Stops found");
        Ok(stops)
    }

    #[instrument(skip(self), fields(location = %location))]
    async fn find_nearby_stops(
        &self,
        location: &GeoLocation,
        radius_meters: u32,
    ) -> Result<Vec<Stop>, TransitError> {
        if radius_meters == 0 {
            return Err(TransitError::InvalidQuery(
                "Radius must be positive".to_string(),
            ));
        }

        let params = vec![
            ("type_sf", "coord".to_string()),
            ("name_sf", location.to_wgs84_query()),
            ("any_obj_filter_sf", ObjectFilter::Stops.as_param().to_string()),
            ("max_no", self.config.max_nearby_results.to_string()),
            ("radius_sf", radius_meters.to_string()),
        ];

        let stops = self
            .get_json::<StopFinderResponse>("stop-finder", params)
            .await?
            .into_stops();

        if stops.is_empty() {
            return Err(TransitError::NoNearbyStops);
        }

        debug!(count = stops.len(), "Nearby stops found");
        Ok(stops)
    }

    #[instrument(skip(self))]
    async fn resolve_site_id(&self, name: &str) -> Result<StopId, TransitError> {
        if name.trim().is_empty() {
            return Err(TransitError::InvalidQuery(
                "Stop name must not be empty".to_string(),
            ));
        }

        if let Some(id) = self.site_ids.get(name) {
            debug!(%id, "Site id cache hit");
            return Ok(id);
        }

        let stops = self.find_stops(name, ObjectFilter::Stops).await?;
        let id = stops
            .into_iter()
            .find(|stop| stop.name_contains(name))
            .map(|stop| stop.id)
            .ok_or_else(|| TransitError::StopNotFound(name.to_string()))?;

        self.site_ids.insert(name, id.clone());
        debug!(%id, "Site id resolved");
        Ok(id)
    }

    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn search_trips(
        &self,
        origin: &GeoLocation,
        destination: &StopId,
        count: u8,
    ) -> Result<Vec<Trip>, TransitError> {
        let count = count.clamp(1, MAX_TRIPS_PER_REQUEST);

        let params = vec![
            ("type_origin", "coord".to_string()),
            ("name_origin", origin.to_wgs84_query()),
            ("type_destination", "any".to_string()),
            ("name_destination", destination.to_string()),
            ("calc_number_of_trips", count.to_string()),
        ];

        let trips = self
            .get_json::<TripsResponse>("trips", params)
            .await?
            .into_trips();

        if trips.is_empty() {
            warn!("No trips found");
        }

        debug!(count = trips.len(), "Trips found");
        Ok(trips)
    }

    async fn is_healthy(&self) -> bool {
        let params = vec![
            ("name_sf", "Slussen".to_string()),
            ("any_obj_filter_sf", ObjectFilter::Stops.as_param().to_string()),
            ("type_sf", "any".to_string()),
        ];
        self.get_json::<StopFinderResponse>("stop-finder", params)
            .await
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_filter_params() {
        assert_eq!(ObjectFilter::Stops.as_param(), "2");
        assert_eq!(ObjectFilter::StopsStreetsAndPois.as_param(), "46");
    }

    #[test]
    fn test_client_creation() {
        let config = JourneyPlannerConfig::for_testing();
        let client = SlJourneyPlannerClient::new(&config, Arc::new(SiteIdCache::new()));
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_shares_cache() {
        let cache = Arc::new(SiteIdCache::new());
        let client =
            SlJourneyPlannerClient::new(&JourneyPlannerConfig::for_testing(), Arc::clone(&cache))
                .unwrap();
        cache.insert("Slussen", StopId::new("9192").unwrap());
        assert_eq!(client.site_id_cache().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_query_rejected_without_network() {
        let config = JourneyPlannerConfig::for_testing().with_base_url("http://127.0.0.1:1");
        let client = SlJourneyPlannerClient::new(&config, Arc::new(SiteIdCache::new())).unwrap();

        let result = client.find_stops("   ", ObjectFilter::Stops).await;
        assert!(matches!(result, Err(TransitError::InvalidQuery(_))));

        let result = client.resolve_site_id("").await;
        assert!(matches!(result, Err(TransitError::InvalidQuery(_))));
    }

    #[tokio::test]
    async fn test_zero_radius_rejected() {
        let config = JourneyPlannerConfig::for_testing().with_base_url("http://127.0.0.1:1");
        let client = SlJourneyPlannerClient::new(&config, Arc::new(SiteIdCache::new())).unwrap();

        let result = client.find_nearby_stops(&GeoLocation::slussen(), 0).await;
        assert!(matches!(result, Err(TransitError::InvalidQuery(_))));
    }

    #[tokio::test]
    async fn test_cache_hit_skips_network() {
        let config = JourneyPlannerConfig::for_testing().with_base_url("http://127.0.0.1:1");
        let cache = Arc::new(SiteIdCache::new());
        cache.insert("Fruängen", StopId::new("9091001000009260").unwrap());
        let client = SlJourneyPlannerClient::new(&config, cache).unwrap();

        let id = client.resolve_site_id("Fruängen").await.unwrap();
        assert_eq!(id.as_str(), "9091001000009260");
    }
}

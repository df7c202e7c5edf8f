//! Transit adapter - Implements `StopFinderPort` and `TripPlannerPort` using integration_transit

use std::sync::Arc;

use application::error::{ApplicationError, NetworkOperation};
use application::ports::{StopFilter, StopFinderPort, TripPlannerPort};
use async_trait::async_trait;
use domain::{GeoLocation, Stop, StopId, Trip};
use integration_transit::{JourneyPlannerClient, ObjectFilter, TransitError};
use tracing::{instrument, warn};

/// Adapter for the SL journey planner
pub struct TransitAdapter {
    client: Arc<dyn JourneyPlannerClient>,
}

impl std::fmt::Debug for TransitAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitAdapter")
            .field("client", &"JourneyPlannerClient")
            .finish()
    }
}

impl TransitAdapter {
    /// Create a new transit adapter
    pub fn new(client: Arc<dyn JourneyPlannerClient>) -> Self {
        Self { client }
    }

    const fn object_filter(filter: StopFilter) -> ObjectFilter {
        match filter {
            StopFilter::StopsOnly => ObjectFilter::Stops,
            StopFilter::Broad => ObjectFilter::StopsStreetsAndPois,
        }
    }

    /// Map a client error onto the application taxonomy
    fn map_error(error: TransitError, operation: NetworkOperation) -> ApplicationError {
        match error {
            TransitError::StopNotFound(_) | TransitError::NoNearbyStops => {
                ApplicationError::not_found(error.to_string())
            },
            TransitError::InvalidQuery(message) => ApplicationError::InvalidInput(message),
            other => {
                warn!(error = %other, ?operation, "Journey planner call failed");
                ApplicationError::network(operation, other.to_string())
            },
        }
    }
}

#[async_trait]
impl StopFinderPort for TransitAdapter {
    #[instrument(skip(self))]
    async fn search_stops(
        &self,
        query: &str,
        filter: StopFilter,
    ) -> Result<Vec<Stop>, ApplicationError> {
        self.client
            .find_stops(query, Self::object_filter(filter))
            .await
            .map_err(|e| Self::map_error(e, NetworkOperation::StopSearch))
    }

    #[instrument(skip(self), fields(location = %location))]
    async fn find_nearby(
        &self,
        location: &GeoLocation,
        radius_meters: u32,
    ) -> Result<Vec<Stop>, ApplicationError> {
        self.client
            .find_nearby_stops(location, radius_meters)
            .await
            .map_err(|e| Self::map_error(e, NetworkOperation::NearbyStops))
    }

    #[instrument(skip(self))]
    async fn resolve_site_id(&self, name: &str) -> Result<StopId, ApplicationError> {
        self.client
            .resolve_site_id(name)
            .await
            .map_err(|e| Self::map_error(e, NetworkOperation::StopLookup))
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}

#[async_trait]
impl TripPlannerPort for TransitAdapter {
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn search_trips(
        &self,
        origin: &GeoLocation,
        destination: &StopId,
        count: u8,
    ) -> Result<Vec<Trip>, ApplicationError> {
        self.client
            .search_trips(origin, destination, count)
            .await
            .map_err(|e| Self::map_error(e, NetworkOperation::TripFetch))
    }
}

//! Trip lookup
//!
//! Acquires the traveller's position, resolves the destination to a site id
//! and fetches trip suggestions between the two.

use std::{fmt, sync::Arc, time::Duration};

use domain::{GeoLocation, StopId, Trip};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{GeolocationError, GeolocationPort, StopFinderPort, TripPlannerPort},
};

/// Upper bound on trips per request accepted by the journey planner
pub const MAX_TRIP_COUNT: u8 = 10;

/// Trip lookup tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TripSearchConfig {
    /// Time allowed for obtaining a position
    pub geolocation_timeout_secs: u64,
    /// Number of trips to request
    pub trip_count: u8,
}

impl Default for TripSearchConfig {
    fn default() -> Self {
        Self {
            geolocation_timeout_secs: 10,
            trip_count: 3,
        }
    }
}

impl TripSearchConfig {
    /// Position timeout as a duration
    #[must_use]
    pub const fn geolocation_timeout(&self) -> Duration {
        Duration::from_secs(self.geolocation_timeout_secs)
    }
}

/// Result of a trip lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripSearchOutcome {
    /// Destination as requested
    pub destination: String,
    /// Resolved site id of the destination
    pub stop_id: StopId,
    /// Where the trips start
    pub origin: GeoLocation,
    /// Suggestions, possibly empty
    pub trips: Vec<Trip>,
}

/// Trip lookup service
pub struct TripSearchService {
    stops: Arc<dyn StopFinderPort>,
    planner: Arc<dyn TripPlannerPort>,
    config: TripSearchConfig,
    geolocation_timeout: Duration,
}

impl fmt::Debug for TripSearchService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TripSearchService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TripSearchService {
    /// Create a new trip lookup service
    pub fn new(
        stops: Arc<dyn StopFinderPort>,
        planner: Arc<dyn TripPlannerPort>,
        config: TripSearchConfig,
    ) -> Self {
        let geolocation_timeout = config.geolocation_timeout();
        Self {
            stops,
            planner,
            config,
            geolocation_timeout,
        }
    }

    /// Override the position timeout
    #[must_use]
    pub const fn with_geolocation_timeout(mut self, timeout: Duration) -> Self {
        self.geolocation_timeout = timeout;
        self
    }

    /// Find trips from the traveller's position to `destination`
    #[instrument(skip(self, geolocation))]
    pub async fn search(
        &self,
        destination: &str,
        geolocation: &dyn GeolocationPort,
    ) -> Result<TripSearchOutcome, ApplicationError> {
        if destination.trim().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "Välj en destination först.".to_string(),
            ));
        }

        let origin = self.locate(geolocation).await?;
        let stop_id = self.stops.resolve_site_id(destination).await?;

        let count = self.config.trip_count.clamp(1, MAX_TRIP_COUNT);
        let trips = self.planner.search_trips(&origin, &stop_id, count).await?;

        info!(%stop_id, trips = trips.len(), "Trip lookup finished");
        Ok(TripSearchOutcome {
            destination: destination.to_string(),
            stop_id,
            origin,
            trips,
        })
    }

    async fn locate(
        &self,
        geolocation: &dyn GeolocationPort,
    ) -> Result<GeoLocation, GeolocationError> {
        match timeout(self.geolocation_timeout, geolocation.current_position()).await {
            Ok(Ok(position)) => Ok(position),
            Ok(Err(e)) => {
                warn!(error = %e, "Position unavailable");
                Err(e)
            },
            Err(_) => {
                warn!(timeout = ?self.geolocation_timeout, "Position request timed out");
                Err(GeolocationError::Timeout)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mockall::predicate::eq;

    use super::*;
    use crate::{
        error::NetworkOperation,
        ports::{MockGeolocationPort, MockStopFinderPort, MockTripPlannerPort},
    };

    struct SlowGeolocation(Duration);

    #[async_trait]
    impl GeolocationPort for SlowGeolocation {
        async fn current_position(&self) -> Result<GeoLocation, GeolocationError> {
            tokio::time::sleep(self.0).await;
            Ok(GeoLocation::slussen())
        }
    }

    fn here() -> MockGeolocationPort {
        let mut geo = MockGeolocationPort::new();
        geo.expect_current_position()
            .returning(|| Ok(GeoLocation::slussen()));
        geo
    }

    fn resolving_finder() -> MockStopFinderPort {
        let mut finder = MockStopFinderPort::new();
        finder
            .expect_resolve_site_id()
            .with(eq("Fruängen"))
            .returning(|_| Ok(StopId::new("9260").unwrap()));
        finder
    }

    fn service(finder: MockStopFinderPort, planner: MockTripPlannerPort) -> TripSearchService {
        TripSearchService::new(
            Arc::new(finder),
            Arc::new(planner),
            TripSearchConfig::default(),
        )
    }

    #[tokio::test]
    async fn fetches_trips_for_resolved_stop() {
        let mut planner = MockTripPlannerPort::new();
        planner
            .expect_search_trips()
            .withf(|origin, dest, count| {
                *origin == GeoLocation::slussen() && dest.as_str() == "9260" && *count == 3
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![Trip {
                    legs: Vec::new(),
                    duration_seconds: 1500,
                    realtime_duration_seconds: None,
                    interchanges: 1,
                }])
            });

        let outcome = service(resolving_finder(), planner)
            .search("Fruängen", &here())
            .await
            .unwrap();

        assert_eq!(outcome.stop_id.as_str(), "9260");
        assert_eq!(outcome.trips.len(), 1);
        assert_eq!(outcome.origin, GeoLocation::slussen());
    }

    #[tokio::test]
    async fn no_trips_is_success() {
        let mut planner = MockTripPlannerPort::new();
        planner
            .expect_search_trips()
            .returning(|_, _, _| Ok(Vec::new()));

        let outcome = service(resolving_finder(), planner)
            .search("Fruängen", &here())
            .await
            .unwrap();
        assert!(outcome.trips.is_empty());
    }

    #[tokio::test]
    async fn slow_position_times_out() {
        let mut finder = MockStopFinderPort::new();
        finder.expect_resolve_site_id().never();
        let service = service(finder, MockTripPlannerPort::new())
            .with_geolocation_timeout(Duration::from_millis(20));

        let err = service
            .search("Fruängen", &SlowGeolocation(Duration::from_secs(5)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::Geolocation(GeolocationError::Timeout)
        ));
        assert_eq!(
            err.user_message(),
            "Det tog för lång tid att hitta din position. Försök igen."
        );
    }

    #[tokio::test]
    async fn permission_denied_is_reported_as_such() {
        let mut geo = MockGeolocationPort::new();
        geo.expect_current_position()
            .returning(|| Err(GeolocationError::PermissionDenied));

        let err = service(MockStopFinderPort::new(), MockTripPlannerPort::new())
            .search("Fruängen", &geo)
            .await
            .unwrap_err();

        assert_eq!(
            err.user_message(),
            "Du behöver tillåta plats för att söka resor."
        );
    }

    #[tokio::test]
    async fn unresolvable_destination_is_not_found() {
        let mut finder = MockStopFinderPort::new();
        finder.expect_resolve_site_id().returning(|name| {
            Err(ApplicationError::not_found(format!(
                "Kunde inte hitta hållplatsen {name} just nu"
            )))
        });
        let mut planner = MockTripPlannerPort::new();
        planner.expect_search_trips().never();

        let err = service(finder, planner)
            .search("Atlantis", &here())
            .await
            .unwrap_err();
        assert_eq!(
            err.user_message(),
            "Kunde inte hitta hållplatsen Atlantis just nu"
        );
    }

    #[tokio::test]
    async fn planner_network_error_propagates() {
        let mut planner = MockTripPlannerPort::new();
        planner.expect_search_trips().returning(|_, _, _| {
            Err(ApplicationError::network(NetworkOperation::TripFetch, "500"))
        });

        let err = service(resolving_finder(), planner)
            .search("Fruängen", &here())
            .await
            .unwrap_err();
        assert_eq!(
            err.user_message(),
            "Kunde inte hämta reseförslag. Kontrollera din internetanslutning."
        );
    }

    #[tokio::test]
    async fn blank_destination_is_rejected_before_locating() {
        let mut geo = MockGeolocationPort::new();
        geo.expect_current_position().never();

        let err = service(MockStopFinderPort::new(), MockTripPlannerPort::new())
            .search(" ", &geo)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidInput(_)));
    }
}

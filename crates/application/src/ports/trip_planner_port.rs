//! Trip planner port

use async_trait::async_trait;
use domain::{GeoLocation, StopId, Trip};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for fetching trip suggestions
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TripPlannerPort: Send + Sync {
    /// Up to `count` trips from a coordinate to a stop
    ///
    /// No journeys is an empty list, not an error.
    async fn search_trips(
        &self,
        origin: &GeoLocation,
        destination: &StopId,
        count: u8,
    ) -> Result<Vec<Trip>, ApplicationError>;
}

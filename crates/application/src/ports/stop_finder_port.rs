//! Stop finder port
//!
//! Text search, coordinate search and site-id resolution against the
//! journey planner's stop finder.

use async_trait::async_trait;
use domain::{GeoLocation, Stop, StopId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Which location types a text search may return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopFilter {
    /// Stops only
    StopsOnly,
    /// Stops, streets, addresses and points of interest
    Broad,
}

/// Port for stop lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StopFinderPort: Send + Sync {
    /// Free-text search, results in upstream order
    ///
    /// An empty result is a success.
    async fn search_stops(
        &self,
        query: &str,
        filter: StopFilter,
    ) -> Result<Vec<Stop>, ApplicationError>;

    /// Stops within `radius_meters` of `location`, in upstream order
    ///
    /// Fails with `NotFound` when there are none.
    async fn find_nearby(
        &self,
        location: &GeoLocation,
        radius_meters: u32,
    ) -> Result<Vec<Stop>, ApplicationError>;

    /// Resolve a destination name to its site id, memoized per literal name
    async fn resolve_site_id(&self, name: &str) -> Result<StopId, ApplicationError>;

    /// Check if the journey planner is reachable
    async fn is_available(&self) -> bool;
}

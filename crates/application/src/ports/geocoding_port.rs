//! Geocoding port

use async_trait::async_trait;
use domain::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for turning a free-form address into a coordinate
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Best match for `query`, or `None` when nothing matched
    async fn geocode(&self, query: &str) -> Result<Option<GeoLocation>, ApplicationError>;
}

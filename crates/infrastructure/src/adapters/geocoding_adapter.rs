//! Geocoding adapter - Implements `GeocodingPort` using Nominatim

use std::sync::Arc;

use application::error::{ApplicationError, NetworkOperation};
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::GeoLocation;
use integration_transit::{GeocodingClient, GeocodingError};
use tracing::{debug, instrument, warn};

/// Adapter for address geocoding
pub struct GeocodingAdapter {
    client: Arc<dyn GeocodingClient>,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("client", &"GeocodingClient")
            .finish()
    }
}

impl GeocodingAdapter {
    /// Create a new geocoding adapter
    pub fn new(client: Arc<dyn GeocodingClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<Option<GeoLocation>, ApplicationError> {
        match self.client.geocode(query).await {
            Ok(location) => Ok(Some(location)),
            Err(GeocodingError::AddressNotFound(_)) => {
                debug!(%query, "Address not found");
                Ok(None)
            },
            Err(e) => {
                warn!(error = %e, "Geocoding failed");
                Err(ApplicationError::network(
                    NetworkOperation::Geocoding,
                    e.to_string(),
                ))
            },
        }
    }
}

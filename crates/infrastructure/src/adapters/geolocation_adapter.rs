//! Geolocation adapter - Implements `GeolocationPort` from a client report
//!
//! The traveller's device determines its position; the HTTP client forwards
//! either coordinates or the W3C error code it got.

use application::error::ApplicationError;
use application::ports::{GeolocationError, GeolocationPort};
use async_trait::async_trait;
use domain::{DomainError, GeoLocation};

/// Position as reported by the client
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportedGeolocation {
    /// The device supplied coordinates
    Position(GeoLocation),
    /// The device failed with this error
    Failed(GeolocationError),
}

impl ReportedGeolocation {
    /// Interpret the raw report
    ///
    /// An error code wins over coordinates. Unknown codes and a report with
    /// neither count as an unavailable position.
    ///
    /// # Errors
    ///
    /// Returns an error if only one coordinate is given or the coordinates
    /// are out of range.
    pub fn from_report(
        latitude: Option<f64>,
        longitude: Option<f64>,
        error_code: Option<u8>,
    ) -> Result<Self, ApplicationError> {
        if let Some(code) = error_code {
            return Ok(Self::Failed(
                GeolocationError::from_code(code).unwrap_or(GeolocationError::PositionUnavailable),
            ));
        }

        match (latitude, longitude) {
            (Some(lat), Some(lon)) => GeoLocation::new(lat, lon)
                .map(Self::Position)
                .map_err(|e| DomainError::InvalidCoordinates(e.to_string()).into()),
            (None, None) => Ok(Self::Failed(GeolocationError::PositionUnavailable)),
            _ => Err(ApplicationError::InvalidInput(
                "Både lat och lon måste anges".to_string(),
            )),
        }
    }
}

#[async_trait]
impl GeolocationPort for ReportedGeolocation {
    async fn current_position(&self) -> Result<GeoLocation, GeolocationError> {
        match self {
            Self::Position(location) => Ok(*location),
            Self::Failed(error) => Err(*error),
        }
    }
}

//! Geolocation port
//!
//! Source of the traveller's current position. Failure kinds follow the W3C
//! Geolocation API codes so that clients can forward them unchanged.

use async_trait::async_trait;
use domain::GeoLocation;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why the position could not be determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeolocationError {
    /// The user refused location access (code 1)
    #[error("permission denied")]
    PermissionDenied,
    /// No position could be obtained (code 2)
    #[error("position unavailable")]
    PositionUnavailable,
    /// No position within the allowed time (code 3)
    #[error("timeout")]
    Timeout,
}

impl GeolocationError {
    /// Map a W3C `GeolocationPositionError.code`
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::PermissionDenied),
            2 => Some(Self::PositionUnavailable),
            3 => Some(Self::Timeout),
            _ => None,
        }
    }

    /// W3C code of this failure
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::PermissionDenied => 1,
            Self::PositionUnavailable => 2,
            Self::Timeout => 3,
        }
    }

    /// Localized message
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::PermissionDenied => "Du behöver tillåta plats för att söka resor.",
            Self::PositionUnavailable => {
                "Din position kunde inte hittas. Kontrollera dina inställningar."
            },
            Self::Timeout => "Det tog för lång tid att hitta din position. Försök igen.",
        }
    }
}

/// Port for acquiring the current position once
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeolocationPort: Send + Sync {
    /// Current position of the traveller
    async fn current_position(&self) -> Result<GeoLocation, GeolocationError>;
}

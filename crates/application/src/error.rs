//! Application-level errors
//!
//! Every variant maps to exactly one Swedish message shown to the traveller,
//! see [`ApplicationError::user_message`].

use domain::DomainError;
use thiserror::Error;

use crate::ports::GeolocationError;

/// The upstream call that failed with a transport or status error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkOperation {
    /// Resolving a destination name to a site id
    StopLookup,
    /// Listing stops around a coordinate
    NearbyStops,
    /// Free-text stop search and its fallbacks
    StopSearch,
    /// Fetching trip suggestions
    TripFetch,
    /// Address geocoding
    Geocoding,
    /// Sending the contact email
    MailDelivery,
}

impl NetworkOperation {
    /// Message shown when this operation fails
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::StopLookup => {
                "Kunde inte hämta hållplatsinformation. Kontrollera din internetanslutning."
            },
            Self::NearbyStops => {
                "Kunde inte hämta närliggande hållplatser. Kontrollera din internetanslutning."
            },
            Self::StopSearch | Self::Geocoding => {
                "Kunde inte söka efter hållplatser. Kontrollera din internetanslutning."
            },
            Self::TripFetch => "Kunde inte hämta reseförslag. Kontrollera din internetanslutning.",
            Self::MailDelivery => "Kunde inte skicka e-post",
        }
    }
}

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level validation error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Caller supplied unusable input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Nothing matched; `message` is already user-facing
    #[error("Not found: {message}")]
    NotFound {
        /// Localized explanation
        message: String,
        /// Alternative queries to offer
        suggestions: Vec<String>,
    },

    /// Upstream transport failure or non-success status
    #[error("Network error during {operation:?}: {detail}")]
    Network {
        /// Which call failed
        operation: NetworkOperation,
        /// Technical detail for logs
        detail: String,
    },

    /// Missing or invalid server configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The caller's position could not be determined
    #[error("Geolocation failed: {0}")]
    Geolocation(#[from] GeolocationError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Not-found error without suggestions
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            suggestions: Vec::new(),
        }
    }

    /// Network error for the given operation
    pub fn network(operation: NetworkOperation, detail: impl Into<String>) -> Self {
        Self::Network {
            operation,
            detail: detail.into(),
        }
    }

    /// Re-label a network failure as belonging to `operation`
    ///
    /// Other variants pass through unchanged.
    #[must_use]
    pub fn during(self, operation: NetworkOperation) -> Self {
        match self {
            Self::Network { detail, .. } => Self::Network { operation, detail },
            other => other,
        }
    }

    /// Whether this is a not-found outcome
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The single localized message for this error
    pub fn user_message(&self) -> String {
        match self {
            Self::Domain(DomainError::MissingField(_)) => "Alla fält är obligatoriska".to_string(),
            Self::Domain(DomainError::InvalidEmailAddress(_)) => "Ogiltig e-postadress".to_string(),
            Self::Domain(DomainError::InvalidCoordinates(_)) => "Ogiltiga koordinater".to_string(),
            Self::Domain(_) => "Ogiltig förfrågan".to_string(),
            Self::InvalidInput(message) | Self::NotFound { message, .. } => message.clone(),
            Self::Network { operation, .. } => operation.user_message().to_string(),
            Self::Configuration(_) => "Serverkonfiguration saknas".to_string(),
            Self::Geolocation(err) => err.user_message().to_string(),
            Self::Internal(_) => "Ett oväntat fel uppstod".to_string(),
        }
    }
}

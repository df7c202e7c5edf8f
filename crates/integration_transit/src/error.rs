//! Journey planner error types

use thiserror::Error;

/// Errors that can occur during journey planner operations
#[derive(Debug, Error)]
pub enum TransitError {
    /// Connection to the journey planner failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The journey planner answered with a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from the journey planner
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// No stop matched the requested name
    #[error("Kunde inte hitta hållplatsen {0} just nu")]
    StopNotFound(String),

    /// No stops around the requested coordinate
    #[error("Inga närliggande hållplatser hittades")]
    NoNearbyStops,

    /// Query or parameter rejected before sending
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl TransitError {
    /// Returns true if the request succeeded but matched nothing
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::StopNotFound(_) | Self::NoNearbyStops)
    }
}

//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Invalid email address format
    #[error("Invalid email address: {0}")]
    InvalidEmailAddress(String),

    /// A required field was missing or empty
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Coordinates outside the WGS84 range
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Stop identifier was empty or malformed
    #[error("Invalid stop id: {0}")]
    InvalidStopId(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }
}

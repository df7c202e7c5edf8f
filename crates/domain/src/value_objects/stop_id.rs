//! Stop identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Opaque identifier of a stop in the journey planner
///
/// Either a numeric site id (`9192`) or a global id
/// (`9091001000009192`). The only invariant is that it is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopId(String);

impl StopId {
    /// Create a stop id, rejecting blank input
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidStopId(id));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for StopId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for StopId {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StopId> for String {
    fn from(id: StopId) -> Self {
        id.0
    }
}

impl AsRef<str> for StopId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_site_and_global_ids() {
        assert_eq!(StopId::new("9192").unwrap().as_str(), "9192");
        assert_eq!(
            StopId::new("9091001000009192").unwrap().to_string(),
            "9091001000009192"
        );
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(StopId::new(" 9192 ").unwrap().as_str(), "9192");
    }

    #[test]
    fn rejects_blank() {
        assert!(StopId::new("").is_err());
        assert!(StopId::new("   ").is_err());
    }

    #[test]
    fn serde_is_transparent_and_validating() {
        let id = StopId::new("9192").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"9192\"");
        assert!(serde_json::from_str::<StopId>("\"\"").is_err());
    }
}

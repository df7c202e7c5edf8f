//! Email address value object with validation
//!
//! Used for the sender of a contact-form message. An address must have a
//! non-empty local part, an `@`, and a domain that contains at least one dot
//! (`local@domain.tld`).
//!
//! # Examples
//!
//! ```
//! use domain::EmailAddress;
//!
//! let email = EmailAddress::new("Anna@Example.SE").unwrap();
//! assert_eq!(email.as_str(), "Anna@example.se");
//!
//! assert!(EmailAddress::new("not-an-email").is_err());
//! assert!(EmailAddress::new("anna@localhost").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// A validated email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress {
    #[validate(email)]
    value: String,
}

impl EmailAddress {
    /// Create a new email address, validating the format
    ///
    /// Surrounding whitespace is trimmed and the domain is lowercased. The
    /// local part is kept as typed, since mail servers may treat it as
    /// case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEmailAddress` if the format is invalid.
    pub fn new(email: impl Into<String>) -> Result<Self, DomainError> {
        let raw = email.into();
        let trimmed = raw.trim();
        let value = match trimmed.rsplit_once('@') {
            Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
            None => trimmed.to_string(),
        };

        let candidate = Self { value };
        candidate
            .validate()
            .map_err(|_| DomainError::InvalidEmailAddress(raw.clone()))?;

        if !candidate.has_dotted_domain() {
            return Err(DomainError::InvalidEmailAddress(raw));
        }

        Ok(candidate)
    }

    /// Get the email address as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Get the domain part (after the last @)
    pub fn domain(&self) -> &str {
        self.value.rsplit_once('@').map_or("", |(_, domain)| domain)
    }

    fn has_dotted_domain(&self) -> bool {
        self.domain()
            .split_once('.')
            .is_some_and(|(head, tail)| !head.is_empty() && !tail.is_empty())
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.value
    }
}

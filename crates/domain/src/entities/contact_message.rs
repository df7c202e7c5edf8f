//! Contact-form message

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::EmailAddress;

/// A validated message submitted through the contact form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    /// Sender's name
    pub name: String,
    /// Sender's address, used as reply-to
    pub email: EmailAddress,
    /// Free-text body
    pub message: String,
}

impl ContactMessage {
    /// Validate raw form input
    ///
    /// Presence of all three fields is checked before the email format, so a
    /// form with a blank field always yields `MissingField`.
    pub fn new(name: &str, email: &str, message: &str) -> Result<Self, DomainError> {
        for (field, value) in [("name", name), ("email", email), ("message", message)] {
            if value.trim().is_empty() {
                return Err(DomainError::missing_field(field));
            }
        }

        Ok(Self {
            name: name.trim().to_string(),
            email: EmailAddress::new(email)?,
            message: message.to_string(),
        })
    }

    /// Subject line of the relayed email
    #[must_use]
    pub fn subject(&self) -> String {
        format!("Kontaktformulär: {}", self.name)
    }
}

//! Transactional mail port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A fully composed email ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingEmail {
    /// Sender, e.g. `SL ta mig hem <noreply@example.se>`
    pub from: String,
    /// Recipients
    pub to: Vec<String>,
    /// Reply-to address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    /// Subject line
    pub subject: String,
    /// HTML body
    pub html: String,
    /// Plain-text body
    pub text: String,
}

/// Port for sending email
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MailerPort: Send + Sync {
    /// Deliver the email, returning the provider's message id
    async fn send(&self, email: &OutgoingEmail) -> Result<String, ApplicationError>;
}

//! Resend client for sending mail
//!
//! Uses the Resend REST API (`POST /emails`).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::ResendConfig;

/// Resend API errors
#[derive(Debug, Error)]
pub enum MailError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Mail request timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Missing configuration: {0}")]
    Configuration(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Outgoing mail as accepted by `POST /emails`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailRequest {
    /// `Display Name <address>` or a bare address
    pub from: String,
    pub to: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Trait for mail senders
#[async_trait]
pub trait MailSender: Send + Sync {
    /// Send a message and return the provider's message id
    async fn send(&self, email: &EmailRequest) -> Result<String, MailError>;
}

/// Resend API response for an accepted message
#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// API error response
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    message: Option<String>,
    name: Option<String>,
}

/// Resend client
#[derive(Debug, Clone)]
pub struct ResendClient {
    client: Client,
    config: ResendConfig,
}

impl ResendClient {
    /// Create a new Resend client
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or the HTTP client cannot be
    /// initialized.
    pub fn new(config: ResendConfig) -> Result<Self, MailError> {
        if config.api_key.trim().is_empty() {
            return Err(MailError::Configuration("api_key is required".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("StockholmDirekt/1.0")
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl MailSender for ResendClient {
    #[instrument(skip(self, email), fields(subject = %email.subject))]
    async fn send(&self, email: &EmailRequest) -> Result<String, MailError> {
        let url = format!("{}/emails", self.config.base_url.trim_end_matches('/'));

        debug!(recipients = email.to.len(), "Sending mail via Resend");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(email)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MailError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    MailError::Request(e)
                }
            })?;

        let status = response.status();
        if status.is_success() {
            let body: SendEmailResponse = response
                .json()
                .await
                .map_err(|e| MailError::InvalidResponse(e.to_string()))?;
            debug!(id = %body.id, "Mail accepted");
            Ok(body.id)
        } else {
            let message = match response.json::<ApiErrorResponse>().await {
                Ok(error) => error
                    .message
                    .or(error.name)
                    .unwrap_or_else(|| status.to_string()),
                Err(_) => status.to_string(),
            };
            warn!(status = status.as_u16(), %message, "Resend rejected mail");
            Err(MailError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

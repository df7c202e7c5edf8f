//! API error handling
//!
//! Every error response carries the traveller-facing Swedish message and a
//! stable machine code. Internal details are attached only while
//! [`set_expose_internal_errors`] is on (development).

use std::sync::atomic::{AtomicBool, Ordering};

use application::{ApplicationError, NetworkOperation, ports::GeolocationError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Global flag to control error detail exposure
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// Configure whether internal error details are included in responses
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Not found: {message}")]
    NotFound {
        message: String,
        suggestions: Vec<String>,
    },

    #[error("Geolocation failed: {0}")]
    Geolocation(GeolocationError),

    #[error("Upstream failure: {detail}")]
    Upstream { message: String, detail: String },

    #[error("Mail delivery failed: {0}")]
    MailDelivery(String),

    #[error("Server configuration missing: {0}")]
    Configuration(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Localized message
    pub error: String,
    /// Machine-readable code
    pub code: String,
    /// Alternative queries to try
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    /// Internal detail (development only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Geolocation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MailDelivery(_) | Self::Configuration(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    /// Machine-readable code for this error
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::MalformedRequest(_) => "malformed_request",
            Self::NotFound { .. } => "not_found",
            Self::Geolocation(GeolocationError::PermissionDenied) => "geolocation_permission_denied",
            Self::Geolocation(GeolocationError::PositionUnavailable) => "geolocation_position_unavailable",
            Self::Geolocation(GeolocationError::Timeout) => "geolocation_timeout",
            Self::Upstream { .. } => "network_error",
            Self::MailDelivery(_) => "mail_error",
            Self::Configuration(_) => "configuration_error",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::Internal(_) => "internal_error",
        }
    }

    fn body(&self) -> ErrorResponse {
        let (error, suggestions, details) = match self {
            Self::BadRequest(message) => (message.clone(), None, None),
            Self::MalformedRequest(detail) => (
                "Ogiltig förfrågan".to_string(),
                None,
                Some(detail.clone()),
            ),
            Self::NotFound {
                message,
                suggestions,
            } => (
                message.clone(),
                (!suggestions.is_empty()).then(|| suggestions.clone()),
                None,
            ),
            Self::Geolocation(err) => (err.user_message().to_string(), None, None),
            Self::Upstream { message, detail } => (message.clone(), None, Some(detail.clone())),
            Self::MailDelivery(detail) => (
                NetworkOperation::MailDelivery.user_message().to_string(),
                None,
                Some(detail.clone()),
            ),
            Self::Configuration(detail) => (
                "Serverkonfiguration saknas".to_string(),
                None,
                Some(detail.clone()),
            ),
            Self::MethodNotAllowed => ("Method not allowed".to_string(), None, None),
            Self::Internal(detail) => (
                "Ett oväntat fel uppstod".to_string(),
                None,
                Some(detail.clone()),
            ),
        };

        ErrorResponse {
            error,
            code: self.code().to_string(),
            suggestions,
            details: details.filter(|_| should_expose_details()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        let message = err.user_message();
        match err {
            ApplicationError::Domain(_) | ApplicationError::InvalidInput(_) => {
                Self::BadRequest(message)
            },
            ApplicationError::NotFound { suggestions, .. } => Self::NotFound {
                message,
                suggestions,
            },
            ApplicationError::Geolocation(geo) => Self::Geolocation(geo),
            ApplicationError::Network {
                operation: NetworkOperation::MailDelivery,
                detail,
            } => Self::MailDelivery(detail),
            ApplicationError::Network { detail, .. } => Self::Upstream { message, detail },
            ApplicationError::Configuration(detail) => Self::Configuration(detail),
            ApplicationError::Internal(detail) => Self::Internal(detail),
        }
    }
}

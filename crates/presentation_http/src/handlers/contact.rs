//! Contact form relay handler

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{error::ApiError, extract::ApiJson, state::AppState};

/// Message returned on successful delivery
pub const SENT_MESSAGE: &str = "Meddelandet har skickats";

/// Contact form body; absent fields count as empty
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Successful relay
#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    /// Provider message id
    pub id: String,
}

/// Validate the form and relay it by email
#[instrument(skip(state, request), fields(message_len = request.message.len()))]
pub async fn submit(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ContactRequest>,
) -> Result<Json<ContactResponse>, ApiError> {
    let receipt = state
        .contact
        .submit(&request.name, &request.email, &request.message)
        .await?;

    info!(id = %receipt.id, "Contact message relayed");
    Ok(Json(ContactResponse {
        success: true,
        message: SENT_MESSAGE.to_string(),
        id: receipt.id,
    }))
}

/// Any method other than POST on the contact route
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

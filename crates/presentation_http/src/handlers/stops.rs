//! Stop lookup handlers
//!
//! Free-text search with the geocoding fallback chain, debounced
//! autocomplete, nearby stops and site-id resolution.

use application::{StopCandidate, StopSearchOutcome, Suggestions};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::{GeoLocation, Stop, StopId};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::optional_position;
use crate::{error::ApiError, extract::ApiQuery, state::AppState};

/// Session used when the client does not name one
const DEFAULT_SESSION: &str = "default";

/// Query for `GET /api/stops/search`
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Stop name or address
    #[serde(default)]
    pub q: String,
    /// Caller latitude, for distance annotation
    pub lat: Option<f64>,
    /// Caller longitude, for distance annotation
    pub lon: Option<f64>,
}

/// Search with fallbacks
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<StopSearchOutcome>, ApiError> {
    let near = optional_position(query.lat, query.lon)?;
    let outcome = state.stop_search.search(&query.q, near).await?;
    Ok(Json(outcome))
}

/// Query for `GET /api/stops/suggest`
#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    /// What the user has typed so far
    #[serde(default)]
    pub q: String,
    /// Client session; later requests of a session supersede earlier ones
    pub session: Option<String>,
}

/// Autocomplete results
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub stops: Vec<Stop>,
}

/// Autocomplete; `204 No Content` when a newer request took over
#[instrument(skip(state))]
pub async fn suggest(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SuggestQuery>,
) -> Result<Response, ApiError> {
    let session = query
        .session
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_SESSION);

    match state.autocomplete.suggest(session, &query.q).await? {
        Suggestions::Results(stops) => Ok(Json(SuggestResponse { stops }).into_response()),
        Suggestions::Superseded => {
            debug!(session, "Suggestion superseded");
            Ok(StatusCode::NO_CONTENT.into_response())
        },
    }
}

/// Query for `GET /api/stops/nearby`
#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Search radius in meters
    pub radius: Option<u32>,
}

/// Stops around a position
#[derive(Debug, Serialize, Deserialize)]
pub struct NearbyResponse {
    pub location: GeoLocation,
    pub stops: Vec<StopCandidate>,
}

/// Stops near the given coordinates, in upstream order
#[instrument(skip(state))]
pub async fn nearby(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<NearbyQuery>,
) -> Result<Json<NearbyResponse>, ApiError> {
    let location = optional_position(query.lat, query.lon)?.ok_or_else(|| {
        ApiError::BadRequest("Både lat och lon måste anges".to_string())
    })?;

    let stops = state.stop_search.nearby(&location, query.radius).await?;
    Ok(Json(NearbyResponse { location, stops }))
}

/// Query for `GET /api/stops/resolve`
#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    #[serde(default)]
    pub name: String,
}

/// Resolved site id
#[derive(Debug, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub name: String,
    pub stop_id: StopId,
}

/// Resolve a destination name to its site id
#[instrument(skip(state))]
pub async fn resolve(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ResolveQuery>,
) -> Result<Json<ResolveResponse>, ApiError> {
    let stop_id = state.stop_search.resolve(&query.name).await?;
    Ok(Json(ResolveResponse {
        name: query.name,
        stop_id,
    }))
}

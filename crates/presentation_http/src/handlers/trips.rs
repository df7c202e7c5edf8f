//! Trip lookup handler

use axum::{Json, extract::State};
use domain::{GeoLocation, StopId, Trip};
use infrastructure::adapters::ReportedGeolocation;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, extract::ApiQuery, state::AppState};

/// Query for `GET /api/trips`
///
/// The client sends either its coordinates or the W3C geolocation error code
/// its device reported.
#[derive(Debug, Deserialize)]
pub struct TripsQuery {
    #[serde(default)]
    pub destination: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub geo_error: Option<u8>,
}

/// One trip with its derived presentation fields
#[derive(Debug, Serialize, Deserialize)]
pub struct TripView {
    /// One-line summary with times and lines
    pub summary: String,
    pub duration_minutes: u32,
    #[serde(flatten)]
    pub trip: Trip,
}

impl From<Trip> for TripView {
    fn from(trip: Trip) -> Self {
        Self {
            summary: trip.format_summary(),
            duration_minutes: trip.duration_minutes(),
            trip,
        }
    }
}

/// Trip lookup response
#[derive(Debug, Serialize, Deserialize)]
pub struct TripsResponse {
    pub destination: String,
    pub stop_id: StopId,
    pub origin: GeoLocation,
    pub trips: Vec<TripView>,
}

/// Trips from the reported position to `destination`
#[instrument(skip(state))]
pub async fn search_trips(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TripsQuery>,
) -> Result<Json<TripsResponse>, ApiError> {
    let reported = ReportedGeolocation::from_report(query.lat, query.lon, query.geo_error)?;
    let outcome = state
        .trip_search
        .search(&query.destination, &reported)
        .await?;

    Ok(Json(TripsResponse {
        destination: outcome.destination,
        stop_id: outcome.stop_id,
        origin: outcome.origin,
        trips: outcome.trips.into_iter().map(TripView::from).collect(),
    }))
}

//! Stop search service
//!
//! Turns a free-text query into a short list of stops. A direct stop-finder
//! search is tried first; when it comes back empty the query is geocoded and
//! the stops around the address are listed, with plain text searches as the
//! last resort. The first non-empty branch wins.

use std::{fmt, sync::Arc};

use domain::{GeoLocation, Stop, StopId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::{ApplicationError, NetworkOperation},
    ports::{GeocodingPort, StopFilter, StopFinderPort},
};

/// Stops offered when a search finds nothing
pub const DEFAULT_SUGGESTIONS: [&str; 5] = [
    "Slussen",
    "Centralen",
    "T-Centralen",
    "Gamla Stan",
    "Östermalmstorg",
];

/// Tunables of the fallback chain
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StopSearchConfig {
    /// Appended to the query for the first geocoding attempt
    pub city_qualifier: String,
    /// Radius around a geocoded address
    pub address_radius_meters: u32,
    /// Radius for plain nearby lookups without an explicit radius
    pub default_nearby_radius_meters: u32,
    /// Maximum candidates returned from a search
    pub max_candidates: usize,
    /// Queries suggested when nothing is found
    pub suggestions: Vec<String>,
}

impl Default for StopSearchConfig {
    fn default() -> Self {
        Self {
            city_qualifier: "Stockholm".to_string(),
            address_radius_meters: 2000,
            default_nearby_radius_meters: 1000,
            max_candidates: 5,
            suggestions: DEFAULT_SUGGESTIONS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Which branch of the fallback chain produced the candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Direct stop-finder match
    Direct,
    /// Stops around the geocoded address
    Nearby,
    /// Stops-only search on the first word of the query
    StreetName,
    /// Stops-only search on the whole query after geocoding
    FullQuery,
    /// Stops-only search on the whole query when geocoding found nothing
    TextFallback,
}

/// A stop offered to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopCandidate {
    /// The stop
    #[serde(flatten)]
    pub stop: Stop,
    /// Distance from the caller in whole meters, when the caller's
    /// position and the stop's coordinate are both known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<u32>,
}

/// Result of [`StopSearchService::search`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopSearchOutcome {
    /// The query as searched
    pub query: String,
    /// Winning branch
    pub strategy: SearchStrategy,
    /// Number of matches before truncation
    pub total: usize,
    /// Truncated, optionally distance-annotated matches
    pub candidates: Vec<StopCandidate>,
}

enum Exhausted {
    GeocodingFailed,
    NothingNearby,
}

/// Stop search orchestration
pub struct StopSearchService {
    stops: Arc<dyn StopFinderPort>,
    geocoder: Arc<dyn GeocodingPort>,
    config: StopSearchConfig,
}

impl fmt::Debug for StopSearchService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopSearchService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl StopSearchService {
    /// Create a new stop search service
    pub fn new(
        stops: Arc<dyn StopFinderPort>,
        geocoder: Arc<dyn GeocodingPort>,
        config: StopSearchConfig,
    ) -> Self {
        Self {
            stops,
            geocoder,
            config,
        }
    }

    /// Active configuration
    pub const fn config(&self) -> &StopSearchConfig {
        &self.config
    }

    /// Search for stops matching `query`
    ///
    /// `near` is the caller's own position; when given, candidates carry
    /// their distance from it.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: &str,
        near: Option<GeoLocation>,
    ) -> Result<StopSearchOutcome, ApplicationError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "Ange en hållplats eller adress att söka efter.".to_string(),
            ));
        }

        let (strategy, stops) = match self.run_chain(query).await? {
            Ok(found) => found,
            Err(exhausted) => return Err(self.not_found(query, &exhausted)),
        };

        info!(?strategy, total = stops.len(), "Stop search succeeded");
        Ok(self.outcome(query, strategy, stops, near))
    }

    async fn run_chain(
        &self,
        query: &str,
    ) -> Result<Result<(SearchStrategy, Vec<Stop>), Exhausted>, ApplicationError> {
        let direct = self
            .stops
            .search_stops(query, StopFilter::Broad)
            .await
            .map_err(|e| e.during(NetworkOperation::StopSearch))?;
        if !direct.is_empty() {
            return Ok(Ok((SearchStrategy::Direct, direct)));
        }

        debug!("No direct match, geocoding address");
        let Some(location) = self.geocode(query).await? else {
            let text = self.text_search(query).await;
            if !text.is_empty() {
                return Ok(Ok((SearchStrategy::TextFallback, text)));
            }
            return Ok(Err(Exhausted::GeocodingFailed));
        };

        let nearby = match self
            .stops
            .find_nearby(&location, self.config.address_radius_meters)
            .await
        {
            Ok(stops) => stops,
            Err(e) if e.is_not_found() => Vec::new(),
            Err(e) => return Err(e.during(NetworkOperation::StopSearch)),
        };
        if !nearby.is_empty() {
            return Ok(Ok((SearchStrategy::Nearby, nearby)));
        }

        let street = query.split_whitespace().next().unwrap_or(query);
        let by_street = self.text_search(street).await;
        if !by_street.is_empty() {
            return Ok(Ok((SearchStrategy::StreetName, by_street)));
        }

        if street != query {
            let by_query = self.text_search(query).await;
            if !by_query.is_empty() {
                return Ok(Ok((SearchStrategy::FullQuery, by_query)));
            }
        }

        Ok(Err(Exhausted::NothingNearby))
    }

    async fn geocode(&self, query: &str) -> Result<Option<GeoLocation>, ApplicationError> {
        let qualified = format!("{query} {}", self.config.city_qualifier);
        if let Some(location) = self
            .geocoder
            .geocode(&qualified)
            .await
            .map_err(|e| e.during(NetworkOperation::StopSearch))?
        {
            return Ok(Some(location));
        }

        self.geocoder
            .geocode(query)
            .await
            .map_err(|e| e.during(NetworkOperation::StopSearch))
    }

    /// Stops-only search whose failures count as "nothing found"
    async fn text_search(&self, query: &str) -> Vec<Stop> {
        match self.stops.search_stops(query, StopFilter::StopsOnly).await {
            Ok(stops) => stops,
            Err(e) => {
                warn!(error = %e, query, "Fallback text search failed");
                Vec::new()
            },
        }
    }

    fn not_found(&self, query: &str, exhausted: &Exhausted) -> ApplicationError {
        let suggestions = self.config.suggestions.join(", ");
        let message = match exhausted {
            Exhausted::GeocodingFailed => format!(
                "Kunde inte hitta adressen \"{query}\". Prova att söka efter en hållplats direkt, t.ex. {suggestions}."
            ),
            Exhausted::NothingNearby => format!(
                "Inga hållplatser hittades nära \"{query}\". Prova att söka efter en hållplats direkt, t.ex. {suggestions}."
            ),
        };
        ApplicationError::NotFound {
            message,
            suggestions: self.config.suggestions.clone(),
        }
    }

    fn outcome(
        &self,
        query: &str,
        strategy: SearchStrategy,
        stops: Vec<Stop>,
        near: Option<GeoLocation>,
    ) -> StopSearchOutcome {
        let total = stops.len();
        let candidates = stops
            .into_iter()
            .take(self.config.max_candidates)
            .map(|stop| annotate(stop, near.as_ref()))
            .collect();

        StopSearchOutcome {
            query: query.to_string(),
            strategy,
            total,
            candidates,
        }
    }

    /// Stops around a coordinate, in upstream order
    #[instrument(skip(self))]
    pub async fn nearby(
        &self,
        location: &GeoLocation,
        radius_meters: Option<u32>,
    ) -> Result<Vec<StopCandidate>, ApplicationError> {
        let radius = radius_meters.unwrap_or(self.config.default_nearby_radius_meters);
        if radius == 0 {
            return Err(ApplicationError::InvalidInput(
                "Sökradien måste vara större än noll.".to_string(),
            ));
        }

        let stops = self.stops.find_nearby(location, radius).await?;
        debug!(count = stops.len(), radius, "Found nearby stops");
        Ok(stops
            .into_iter()
            .map(|stop| annotate(stop, Some(location)))
            .collect())
    }

    /// Resolve a destination name to its site id
    #[instrument(skip(self))]
    pub async fn resolve(&self, name: &str) -> Result<StopId, ApplicationError> {
        if name.trim().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "Ange namnet på en hållplats.".to_string(),
            ));
        }
        self.stops.resolve_site_id(name).await
    }

    /// Check if the journey planner is reachable
    pub async fn is_available(&self) -> bool {
        self.stops.is_available().await
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn annotate(stop: Stop, near: Option<&GeoLocation>) -> StopCandidate {
    let distance_meters = near
        .and_then(|origin| stop.distance_from(origin))
        .map(|d| d.round() as u32);
    StopCandidate {
        stop,
        distance_meters,
    }
}

//! Stop autocomplete
//!
//! Type-ahead suggestions for the destination field. Each keystroke is a
//! request; after a short debounce only the latest request of a session
//! reaches the stop finder and only its answer is returned.

use std::{fmt, sync::Arc, time::Duration};

use domain::Stop;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::request_generation::{DEFAULT_SESSION_CAPACITY, RequestGenerations};
use crate::{
    error::{ApplicationError, NetworkOperation},
    ports::{StopFilter, StopFinderPort},
};

/// Autocomplete tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteConfig {
    /// Shorter queries return nothing without a lookup
    pub min_query_chars: usize,
    /// Quiet period before a request is dispatched
    pub debounce_ms: u64,
    /// Maximum suggestions returned
    pub max_results: usize,
    /// Tracked sessions before idle ones are pruned
    pub max_sessions: usize,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            min_query_chars: 2,
            debounce_ms: 300,
            max_results: 8,
            max_sessions: DEFAULT_SESSION_CAPACITY,
        }
    }
}

/// Answer to one autocomplete request
#[derive(Debug, Clone, PartialEq)]
pub enum Suggestions {
    /// Matching stops, possibly empty
    Results(Vec<Stop>),
    /// A newer request of the same session took over
    Superseded,
}

/// Debounced, last-request-wins stop autocomplete
pub struct AutocompleteService {
    stops: Arc<dyn StopFinderPort>,
    config: AutocompleteConfig,
    generations: RequestGenerations,
}

impl fmt::Debug for AutocompleteService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutocompleteService")
            .field("config", &self.config)
            .field("sessions", &self.generations.session_count())
            .finish_non_exhaustive()
    }
}

impl AutocompleteService {
    /// Create a new autocomplete service
    pub fn new(stops: Arc<dyn StopFinderPort>, config: AutocompleteConfig) -> Self {
        let generations = RequestGenerations::new(config.max_sessions);
        Self {
            stops,
            config,
            generations,
        }
    }

    /// Suggest stops for `query` on behalf of `session`
    #[instrument(skip(self))]
    pub async fn suggest(
        &self,
        session: &str,
        query: &str,
    ) -> Result<Suggestions, ApplicationError> {
        let ticket = self.generations.issue(session);

        let query = query.trim();
        if query.chars().count() < self.config.min_query_chars {
            return Ok(Suggestions::Results(Vec::new()));
        }

        tokio::time::sleep(Duration::from_millis(self.config.debounce_ms)).await;
        if !ticket.is_current() {
            debug!(generation = ticket.generation(), "Superseded during debounce");
            return Ok(Suggestions::Superseded);
        }

        let mut stops = self
            .stops
            .search_stops(query, StopFilter::StopsOnly)
            .await
            .map_err(|e| e.during(NetworkOperation::StopSearch))?;

        if !ticket.is_current() {
            debug!(generation = ticket.generation(), "Superseded during lookup");
            return Ok(Suggestions::Superseded);
        }

        stops.truncate(self.config.max_results);
        Ok(Suggestions::Results(stops))
    }
}

#[cfg(test)]
mod tests {
    use domain::StopId;
    use mockall::predicate::{always, eq};

    use super::*;
    use crate::ports::MockStopFinderPort;

    fn config(debounce_ms: u64) -> AutocompleteConfig {
        AutocompleteConfig {
            debounce_ms,
            ..AutocompleteConfig::default()
        }
    }

    fn stops(n: usize) -> Vec<Stop> {
        (0..n)
            .map(|i| Stop::new(StopId::new(format!("{i}")).unwrap(), format!("Stop {i}")))
            .collect()
    }

    #[tokio::test]
    async fn short_query_skips_lookup() {
        let mut finder = MockStopFinderPort::new();
        finder.expect_search_stops().never();
        let service = AutocompleteService::new(Arc::new(finder), config(0));

        let result = service.suggest("s", "S").await.unwrap();
        assert_eq!(result, Suggestions::Results(Vec::new()));
    }

    #[tokio::test]
    async fn results_are_capped() {
        let mut finder = MockStopFinderPort::new();
        finder
            .expect_search_stops()
            .with(eq("Sl"), eq(StopFilter::StopsOnly))
            .times(1)
            .returning(|_, _| Ok(stops(12)));
        let service = AutocompleteService::new(Arc::new(finder), config(0));

        let Suggestions::Results(found) = service.suggest("s", "Sl").await.unwrap() else {
            panic!("expected results");
        };
        assert_eq!(found.len(), 8);
    }

    #[tokio::test]
    async fn superseded_request_yields_no_results() {
        let mut finder = MockStopFinderPort::new();
        finder
            .expect_search_stops()
            .with(eq("Slussen"), always())
            .times(1)
            .returning(|_, _| Ok(stops(1)));
        let service = AutocompleteService::new(Arc::new(finder), config(50));

        let (first, second) = tokio::join!(
            service.suggest("tab-1", "Sluss"),
            async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                service.suggest("tab-1", "Slussen").await
            }
        );

        assert_eq!(first.unwrap(), Suggestions::Superseded);
        assert_eq!(second.unwrap(), Suggestions::Results(stops(1)));
    }

    #[tokio::test]
    async fn other_sessions_are_not_superseded() {
        let mut finder = MockStopFinderPort::new();
        finder
            .expect_search_stops()
            .times(2)
            .returning(|_, _| Ok(stops(2)));
        let service = AutocompleteService::new(Arc::new(finder), config(20));

        let (a, b) = tokio::join!(
            service.suggest("tab-1", "Odenplan"),
            service.suggest("tab-2", "Odenplan")
        );
        assert!(matches!(a.unwrap(), Suggestions::Results(_)));
        assert!(matches!(b.unwrap(), Suggestions::Results(_)));
    }

    #[tokio::test]
    async fn lookup_errors_are_search_errors() {
        let mut finder = MockStopFinderPort::new();
        finder.expect_search_stops().returning(|_, _| {
            Err(ApplicationError::network(NetworkOperation::StopLookup, "timeout"))
        });
        let service = AutocompleteService::new(Arc::new(finder), config(0));

        let err = service.suggest("s", "Slussen").await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Network {
                operation: NetworkOperation::StopSearch,
                ..
            }
        ));
    }
}

//! Application services - Use case implementations

mod autocomplete_service;
mod contact_service;
mod request_generation;
mod stop_search_service;
mod trip_search_service;

pub use autocomplete_service::{AutocompleteConfig, AutocompleteService, Suggestions};
pub use contact_service::{ContactReceipt, ContactService, ContactSettings, SENDER_NAME};
pub use request_generation::{GenerationTicket, RequestGenerations};
pub use stop_search_service::{
    DEFAULT_SUGGESTIONS, SearchStrategy, StopCandidate, StopSearchConfig, StopSearchOutcome,
    StopSearchService,
};
pub use trip_search_service::{
    MAX_TRIP_COUNT, TripSearchConfig, TripSearchOutcome, TripSearchService,
};

//! Application state shared across handlers

use std::sync::Arc;

use application::{
    AutocompleteService, ContactService, StopSearchService, TemplateError, TripSearchService,
    ports::{GeocodingPort, MailerPort, StopFinderPort, TripPlannerPort},
};
use infrastructure::{
    AppConfig,
    adapters::{GeocodingAdapter, MailAdapter, TransitAdapter},
};
use integration_mail::{MailError, ResendClient};
use integration_transit::{
    GeocodingError, NominatimGeocodingClient, SiteIdCache, SlJourneyPlannerClient, TransitError,
};
use thiserror::Error;
use tracing::{info, warn};

/// Failure to assemble the services at startup
#[derive(Debug, Error)]
pub enum StateError {
    #[error("journey planner client: {0}")]
    Transit(#[from] TransitError),

    #[error("geocoding client: {0}")]
    Geocoding(#[from] GeocodingError),

    #[error("mail client: {0}")]
    Mail(#[from] MailError),

    #[error("contact settings: {0}")]
    Contact(#[from] domain::DomainError),

    #[error("mail templates: {0}")]
    Templates(#[from] TemplateError),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Stop search with geocoding fallback
    pub stop_search: Arc<StopSearchService>,
    /// Debounced autocomplete
    pub autocomplete: Arc<AutocompleteService>,
    /// Trip lookup
    pub trip_search: Arc<TripSearchService>,
    /// Contact relay
    pub contact: Arc<ContactService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("stop_search", &self.stop_search)
            .field("trip_search", &self.trip_search)
            .field("contact", &self.contact)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire services onto the given ports
    ///
    /// # Errors
    ///
    /// Returns an error if the contact recipient is not a valid address or
    /// the mail templates fail to compile.
    pub fn new(
        stops: Arc<dyn StopFinderPort>,
        planner: Arc<dyn TripPlannerPort>,
        geocoder: Arc<dyn GeocodingPort>,
        mailer: Option<Arc<dyn MailerPort>>,
        config: AppConfig,
    ) -> Result<Self, StateError> {
        let contact_settings = config.contact.to_contact_settings()?;

        let stop_search = StopSearchService::new(
            Arc::clone(&stops),
            geocoder,
            config.search.to_stop_search_config(),
        );
        let autocomplete =
            AutocompleteService::new(Arc::clone(&stops), config.search.to_autocomplete_config());
        let trip_search =
            TripSearchService::new(stops, planner, config.trips.to_trip_search_config());
        let contact = ContactService::new(mailer, contact_settings)?;

        Ok(Self {
            stop_search: Arc::new(stop_search),
            autocomplete: Arc::new(autocomplete),
            trip_search: Arc::new(trip_search),
            contact: Arc::new(contact),
            config: Arc::new(config),
        })
    }

    /// Build the real upstream clients from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built or the contact
    /// recipient is not a valid address.
    pub fn from_config(config: AppConfig) -> Result<Self, StateError> {
        let site_ids = Arc::new(SiteIdCache::new());
        let planner_client = SlJourneyPlannerClient::new(
            &config.journey_planner.to_client_config(),
            site_ids,
        )?;
        let transit = Arc::new(TransitAdapter::new(Arc::new(planner_client)));

        let geocoding_client =
            NominatimGeocodingClient::new(&config.geocoding.to_nominatim_config())?;
        let geocoder: Arc<dyn GeocodingPort> =
            Arc::new(GeocodingAdapter::new(Arc::new(geocoding_client)));

        let mailer: Option<Arc<dyn MailerPort>> = match config.contact.to_resend_config() {
            Some(resend) => {
                let client = ResendClient::new(resend)?;
                info!("Contact relay enabled");
                Some(Arc::new(MailAdapter::new(Arc::new(client))))
            },
            None => {
                warn!("No mail API key configured, contact relay is disabled");
                None
            },
        };

        Self::new(
            Arc::clone(&transit) as Arc<dyn StopFinderPort>,
            transit,
            geocoder,
            mailer,
            config,
        )
    }
}

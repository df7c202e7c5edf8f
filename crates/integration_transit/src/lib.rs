//! Journey planner integration for Stockholm Direkt
//!
//! Talks to the stop finder and trip endpoints of
//! [SL Journey-planner v2](https://journeyplanner.integration.sl.se/v2) and
//! geocodes free-form addresses via
//! [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org).
//!
//! # Architecture
//!
//! [`JourneyPlannerClient`] defines stop search, nearby-stop lookup, site-id
//! resolution and trip search, implemented by [`SlJourneyPlannerClient`].
//! Resolved site ids are memoized in a shared [`SiteIdCache`].
//! [`GeocodingClient`] handles address-to-coordinate conversion via
//! [`NominatimGeocodingClient`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use integration_transit::{JourneyPlannerConfig, SiteIdCache, SlJourneyPlannerClient};
//!
//! let client = SlJourneyPlannerClient::new(
//!     &JourneyPlannerConfig::default(),
//!     Arc::new(SiteIdCache::new()),
//! )?;
//!
//! let site_id = client.resolve_site_id("Fruängen").await?;
//! let trips = client.search_trips(&GeoLocation::slussen(), &site_id, 3).await?;
//! ```

mod client;
mod config;
mod error;
mod geocoding;
mod models;
mod site_id_cache;

pub use client::{JourneyPlannerClient, ObjectFilter, SlJourneyPlannerClient};
pub use config::JourneyPlannerConfig;
pub use error::TransitError;
pub use geocoding::{GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient};
pub use site_id_cache::SiteIdCache;

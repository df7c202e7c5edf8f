//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the journey
//! planner, Nominatim and Resend integrations, and owns configuration
//! loading and tracing setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, ContactAppConfig, Environment, GeocodingAppConfig, JourneyPlannerAppConfig,
    LogFormat, SearchAppConfig, ServerConfig, TripsAppConfig,
};
pub use telemetry::{DEFAULT_LOG_FILTER, TelemetryError, init_tracing};

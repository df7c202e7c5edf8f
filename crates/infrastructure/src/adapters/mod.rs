//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod geocoding_adapter;
mod geolocation_adapter;
mod mail_adapter;
mod transit_adapter;

pub use geocoding_adapter::GeocodingAdapter;
pub use geolocation_adapter::ReportedGeolocation;
pub use mail_adapter::MailAdapter;
pub use transit_adapter::TransitAdapter;

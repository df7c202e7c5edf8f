//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod geocoding_port;
mod geolocation_port;
mod mailer_port;
mod stop_finder_port;
mod trip_planner_port;

#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use geocoding_port::GeocodingPort;
#[cfg(test)]
pub use geolocation_port::MockGeolocationPort;
pub use geolocation_port::{GeolocationError, GeolocationPort};
#[cfg(test)]
pub use mailer_port::MockMailerPort;
pub use mailer_port::{MailerPort, OutgoingEmail};
#[cfg(test)]
pub use stop_finder_port::MockStopFinderPort;
pub use stop_finder_port::{StopFilter, StopFinderPort};
#[cfg(test)]
pub use trip_planner_port::MockTripPlannerPort;
pub use trip_planner_port::TripPlannerPort;

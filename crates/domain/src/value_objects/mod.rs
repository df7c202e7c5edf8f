//! Value Objects - Immutable, identity-less domain primitives

mod email_address;
mod geo_location;
mod stop_id;

pub use email_address::EmailAddress;
pub use geo_location::{EARTH_RADIUS_METERS, GeoLocation, InvalidCoordinates, haversine_distance_m};
pub use stop_id::StopId;

//! Geographic location value object and great-circle distance

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A WGS84 position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

/// Error type for invalid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCoordinates;

impl fmt::Display for InvalidCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180"
        )
    }
}

impl std::error::Error for InvalidCoordinates {}

impl GeoLocation {
    /// Create a new location with validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if latitude is not in [-90, 90],
    /// longitude is not in [-180, 180], or either value is not finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a location without validation (for constants and trusted sources)
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a location from the journey planner's `[lat, lon]` coordinate array
    ///
    /// Returns `None` for arrays that are too short or out of range.
    #[must_use]
    pub fn from_lat_lon_pair(pair: &[f64]) -> Option<Self> {
        match pair {
            [lat, lon, ..] => Self::new(*lat, *lon).ok(),
            _ => None,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another location in meters
    #[must_use]
    pub fn distance_meters(&self, other: &Self) -> f64 {
        haversine_distance_m(self, other)
    }

    /// Coordinate string understood by the journey planner's coordinate mode
    ///
    /// Longitude comes first: `18.07:59.33:WGS84[dd.ddddd]`.
    #[must_use]
    pub fn to_wgs84_query(&self) -> String {
        format!("{}:{}:WGS84[dd.ddddd]", self.longitude, self.latitude)
    }
}

/// Haversine great-circle distance in meters
///
/// Symmetric in its arguments and exactly zero for identical points. The
/// intermediate term is clamped so that antipodal points yield `π·R`
/// instead of `NaN`.
#[must_use]
pub fn haversine_distance_m(a: &GeoLocation, b: &GeoLocation) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (lat1.cos() * lat2.cos())
        .mul_add(
            (delta_lon / 2.0).sin().powi(2),
            (delta_lat / 2.0).sin().powi(2),
        )
        .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Well-known places in Stockholm
impl GeoLocation {
    /// T-Centralen
    #[must_use]
    pub const fn t_centralen() -> Self {
        Self::new_unchecked(59.331_37, 18.061_37)
    }

    /// Slussen
    #[must_use]
    pub const fn slussen() -> Self {
        Self::new_unchecked(59.319_52, 18.072_38)
    }

    /// Fruängen
    #[must_use]
    pub const fn fruangen() -> Self {
        Self::new_unchecked(59.286_55, 17.964_93)
    }
}

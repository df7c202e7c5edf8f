//! Stop entity as known to the journey planner

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::{GeoLocation, StopId};

/// A stop, station or other location returned by the stop finder
///
/// Stops may be nested: a platform has its station as `parent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Upstream identifier
    pub id: StopId,
    /// Whether `id` is a global id rather than a site id
    #[serde(default)]
    pub is_global_id: bool,
    /// Full display name, e.g. "Slussen, Stockholm"
    pub name: String,
    /// Short name without the municipality
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disassembled_name: Option<String>,
    /// Upstream location type (`stop`, `street`, `poi`, ...)
    pub location_type: String,
    /// Position in WGS84
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<GeoLocation>,
    /// Level within a multi-level station
    #[serde(default)]
    pub niveau: i32,
    /// Enclosing location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<Stop>>,
    /// Product classes served at this stop
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub product_classes: Vec<u8>,
}

impl Stop {
    /// Create a stop with the given id and name
    #[must_use]
    pub fn new(id: StopId, name: impl Into<String>) -> Self {
        Self {
            id,
            is_global_id: false,
            name: name.into(),
            disassembled_name: None,
            location_type: String::from("stop"),
            coordinate: None,
            niveau: 0,
            parent: None,
            product_classes: Vec::new(),
        }
    }

    /// Set the coordinate
    #[must_use]
    pub fn with_coordinate(mut self, coordinate: GeoLocation) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    /// Set the served product classes
    #[must_use]
    pub fn with_product_classes(mut self, classes: Vec<u8>) -> Self {
        self.product_classes = classes;
        self
    }

    /// Case-insensitive substring match on the display name
    #[must_use]
    pub fn name_contains(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }

    /// Short name if present, otherwise the full name
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.disassembled_name.as_deref().unwrap_or(&self.name)
    }

    /// Distance in meters from `origin`, if this stop has a coordinate
    #[must_use]
    pub fn distance_from(&self, origin: &GeoLocation) -> Option<f64> {
        self.coordinate.map(|c| origin.distance_meters(&c))
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

//! Journey planner wire models
//!
//! Raw shapes of the `stop-finder` and `trips` responses and their
//! conversion into domain entities. Fields the journey planner may omit are
//! optional; malformed entries are skipped rather than failing the response.

use chrono::{DateTime, Utc};
use domain::{GeoLocation, Leg, LegEndpoint, Stop, StopId, TransitMode, Transportation, Trip};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct StopFinderResponse {
    #[serde(default)]
    pub locations: Vec<RawLocation>,
}

impl StopFinderResponse {
    /// Convertible locations in upstream order
    pub fn into_stops(self) -> Vec<Stop> {
        self.locations
            .into_iter()
            .filter_map(RawLocation::into_stop)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawLocation {
    id: Option<String>,
    #[serde(default)]
    is_global_id: bool,
    name: Option<String>,
    disassembled_name: Option<String>,
    #[serde(rename = "type")]
    location_type: Option<String>,
    #[serde(default)]
    coord: Vec<f64>,
    #[serde(default)]
    niveau: i32,
    parent: Option<Box<RawLocation>>,
    #[serde(default)]
    product_classes: Vec<u8>,
}

impl RawLocation {
    pub fn into_stop(self) -> Option<Stop> {
        let id = StopId::new(self.id?).ok()?;
        Some(Stop {
            id,
            is_global_id: self.is_global_id,
            name: self.name.unwrap_or_default(),
            disassembled_name: self.disassembled_name,
            location_type: self.location_type.unwrap_or_else(|| "unknown".to_string()),
            coordinate: GeoLocation::from_lat_lon_pair(&self.coord),
            niveau: self.niveau,
            parent: self.parent.and_then(|p| p.into_stop()).map(Box::new),
            product_classes: self.product_classes,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TripsResponse {
    #[serde(default)]
    pub journeys: Option<Vec<RawJourney>>,
}

impl TripsResponse {
    pub fn into_trips(self) -> Vec<Trip> {
        self.journeys
            .unwrap_or_default()
            .into_iter()
            .map(RawJourney::into_trip)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawJourney {
    trip_duration: Option<u32>,
    trip_rt_duration: Option<u32>,
    #[serde(default)]
    interchanges: u32,
    #[serde(default)]
    legs: Vec<RawLeg>,
}

impl RawJourney {
    fn into_trip(self) -> Trip {
        let legs: Vec<Leg> = self.legs.into_iter().map(RawLeg::into_leg).collect();
        let duration_seconds = self
            .trip_duration
            .unwrap_or_else(|| legs.iter().map(|l| l.duration_seconds).sum());

        Trip {
            legs,
            duration_seconds,
            realtime_duration_seconds: self.trip_rt_duration,
            interchanges: self.interchanges,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLeg {
    origin: RawEndpoint,
    destination: RawEndpoint,
    transportation: Option<RawTransportation>,
    distance: Option<f64>,
    #[serde(default)]
    duration: u32,
    #[serde(default)]
    coords: Vec<Vec<f64>>,
}

impl RawLeg {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn into_leg(self) -> Leg {
        Leg {
            origin: self.origin.into_departure(),
            destination: self.destination.into_arrival(),
            transportation: self
                .transportation
                .map_or_else(unknown_transportation, RawTransportation::into_transportation),
            distance_meters: self
                .distance
                .filter(|d| d.is_finite() && *d >= 0.0)
                .map(|d| d.round() as u32),
            duration_seconds: self.duration,
            path: self
                .coords
                .iter()
                .filter_map(|pair| GeoLocation::from_lat_lon_pair(pair))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEndpoint {
    id: Option<String>,
    name: Option<String>,
    disassembled_name: Option<String>,
    #[serde(default)]
    coord: Vec<f64>,
    departure_time_planned: Option<DateTime<Utc>>,
    departure_time_estimated: Option<DateTime<Utc>>,
    arrival_time_planned: Option<DateTime<Utc>>,
    arrival_time_estimated: Option<DateTime<Utc>>,
}

impl RawEndpoint {
    fn into_departure(self) -> LegEndpoint {
        let (planned, estimated) = (self.departure_time_planned, self.departure_time_estimated);
        self.into_endpoint(planned, estimated)
    }

    fn into_arrival(self) -> LegEndpoint {
        let (planned, estimated) = (self.arrival_time_planned, self.arrival_time_estimated);
        self.into_endpoint(planned, estimated)
    }

    fn into_endpoint(
        self,
        planned_time: Option<DateTime<Utc>>,
        estimated_time: Option<DateTime<Utc>>,
    ) -> LegEndpoint {
        LegEndpoint {
            id: self.id,
            name: self.name.unwrap_or_default(),
            short_name: self.disassembled_name,
            coordinate: GeoLocation::from_lat_lon_pair(&self.coord),
            planned_time,
            estimated_time,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransportation {
    name: Option<String>,
    disassembled_name: Option<String>,
    number: Option<String>,
    direction: Option<String>,
    destination: Option<RawNamed>,
    operator: Option<RawNamed>,
    product: Option<RawProduct>,
    properties: Option<RawProperties>,
}

impl RawTransportation {
    fn into_transportation(self) -> Transportation {
        let product_class = self.product.and_then(|p| p.class);
        let mode = product_class.map_or(TransitMode::Unknown, TransitMode::from_product_class);
        let line = self
            .disassembled_name
            .or(self.number)
            .or_else(|| self.properties.and_then(|p| p.line_display));

        Transportation {
            mode,
            product_class,
            line,
            name: self.name,
            direction: self.destination.and_then(|d| d.name).or(self.direction),
            operator: self.operator.and_then(|o| o.name),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawNamed {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawProduct {
    class: Option<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProperties {
    line_display: Option<String>,
}

const fn unknown_transportation() -> Transportation {
    Transportation {
        mode: TransitMode::Unknown,
        product_class: None,
        line: None,
        name: None,
        direction: None,
        operator: None,
    }
}

//! Trip entities
//!
//! A trip is an ordered list of legs from the caller's position to a
//! destination stop. Leg continuity is taken from the journey planner as is.

use std::fmt;

use chrono::{DateTime, Utc};
use chrono_tz::{Europe::Stockholm, Tz};
use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// Zone that clock times shown to travellers are rendered in
pub const LOCAL_TIME_ZONE: Tz = Stockholm;

/// A complete trip suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Legs in travel order
    pub legs: Vec<Leg>,
    /// Planned total duration in seconds
    pub duration_seconds: u32,
    /// Real-time total duration in seconds, if reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realtime_duration_seconds: Option<u32>,
    /// Number of changes between vehicles
    pub interchanges: u32,
}

impl Trip {
    /// Departure time of the first leg (estimated if known)
    #[must_use]
    pub fn departure(&self) -> Option<DateTime<Utc>> {
        self.legs.first().and_then(|leg| leg.origin.effective_time())
    }

    /// Arrival time of the last leg (estimated if known)
    #[must_use]
    pub fn arrival(&self) -> Option<DateTime<Utc>> {
        self.legs.last().and_then(|leg| leg.destination.effective_time())
    }

    /// Total travel time in whole minutes, preferring the real-time value
    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        self.realtime_duration_seconds
            .unwrap_or(self.duration_seconds)
            / 60
    }

    /// Departure delay of the first leg in minutes, if any
    #[must_use]
    pub fn departure_delay_minutes(&self) -> Option<i64> {
        self.legs.first().and_then(|leg| leg.origin.delay_minutes())
    }

    /// Format as a compact one-line summary with Stockholm clock times
    #[must_use]
    pub fn format_summary(&self) -> String {
        let (Some(dep), Some(arr)) = (self.departure(), self.arrival()) else {
            return String::from("Ingen resedata");
        };

        let route = self
            .legs
            .iter()
            .filter(|leg| leg.transportation.mode != TransitMode::Walking)
            .map(|leg| {
                format!(
                    "{} {}",
                    leg.transportation.mode.emoji(),
                    leg.transportation.line_label()
                )
            })
            .collect::<Vec<_>>()
            .join(" → ");

        let delay = match self.departure_delay_minutes() {
            Some(mins) if mins > 0 => format!(" ⚠️ +{mins} min"),
            _ => String::new(),
        };

        format!(
            "{} → {} ({} min, {} byten) {route}{delay}",
            dep.with_timezone(&LOCAL_TIME_ZONE).format("%H:%M"),
            arr.with_timezone(&LOCAL_TIME_ZONE).format("%H:%M"),
            self.duration_minutes(),
            self.interchanges
        )
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_summary())
    }
}

/// A single segment of a trip on one vehicle or on foot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    /// Where the leg starts
    pub origin: LegEndpoint,
    /// Where the leg ends
    pub destination: LegEndpoint,
    /// Vehicle or walking descriptor
    pub transportation: Transportation,
    /// Distance in meters, if reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<u32>,
    /// Duration in seconds
    pub duration_seconds: u32,
    /// Polyline of the leg
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<GeoLocation>,
}

/// Start or end point of a leg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegEndpoint {
    /// Upstream identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name
    pub name: String,
    /// Short name without municipality
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    /// Position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<GeoLocation>,
    /// Timetable time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_time: Option<DateTime<Utc>>,
    /// Real-time estimate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<DateTime<Utc>>,
}

impl LegEndpoint {
    /// Estimated time when known, otherwise the planned one
    #[must_use]
    pub fn effective_time(&self) -> Option<DateTime<Utc>> {
        self.estimated_time.or(self.planned_time)
    }

    /// Signed delay in whole minutes; `None` without both timestamps
    #[must_use]
    pub fn delay_minutes(&self) -> Option<i64> {
        match (self.planned_time, self.estimated_time) {
            (Some(planned), Some(estimated)) => Some((estimated - planned).num_minutes()),
            _ => None,
        }
    }
}

/// Vehicle descriptor of a leg
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transportation {
    /// Classified mode
    pub mode: TransitMode,
    /// Raw product class from the journey planner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_class: Option<u8>,
    /// Short line designation, e.g. "14" or "T14"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    /// Full name, e.g. "Tunnelbana 14"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Headsign / final destination
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    /// Operating company
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
}

impl Transportation {
    /// Walking descriptor
    #[must_use]
    pub const fn walking() -> Self {
        Self {
            mode: TransitMode::Walking,
            product_class: Some(100),
            line: None,
            name: None,
            direction: None,
            operator: None,
        }
    }

    /// Line if present, else name, else the mode label
    #[must_use]
    pub fn line_label(&self) -> &str {
        self.line
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_else(|| self.mode.label())
    }
}

/// Transit mode classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitMode {
    /// Pendeltåg
    CommuterTrain,
    /// Tunnelbana
    Metro,
    /// Spårvagn / lokalbana
    Tram,
    /// Buss
    Bus,
    /// Båt
    Ferry,
    /// Gång
    Walking,
    /// Unknown product class
    Unknown,
}

impl TransitMode {
    /// Map a journey-planner product class to a transit mode
    #[must_use]
    pub const fn from_product_class(class: u8) -> Self {
        match class {
            0 | 1 => Self::CommuterTrain,
            2 => Self::Metro,
            4 => Self::Tram,
            5 | 6 | 7 | 10 => Self::Bus,
            9 => Self::Ferry,
            99 | 100 => Self::Walking,
            _ => Self::Unknown,
        }
    }

    /// Emoji representation
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::CommuterTrain => "🚆",
            Self::Metro => "🚇",
            Self::Tram => "🚊",
            Self::Bus => "🚌",
            Self::Ferry => "⛴️",
            Self::Walking => "🚶",
            Self::Unknown => "🚋",
        }
    }

    /// Swedish label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CommuterTrain => "Pendeltåg",
            Self::Metro => "Tunnelbana",
            Self::Tram => "Spårvagn",
            Self::Bus => "Buss",
            Self::Ferry => "Båt",
            Self::Walking => "Gång",
            Self::Unknown => "Kollektivtrafik",
        }
    }
}

impl fmt::Display for TransitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

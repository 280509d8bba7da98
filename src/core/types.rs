//! Core data types for the station compass

use serde::{Deserialize, Serialize};

/// Geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Point of interest from the static catalog.
///
/// Identity is the `(name, group)` pair; the same station name can appear
/// once per line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub name: String,
    /// Line (or other grouping) the point belongs to
    #[serde(rename = "line")]
    pub group: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Display color of the group, usually a CSS hex string
    #[serde(rename = "lineColor")]
    pub color_tag: String,
}

impl GeoPoint {
    pub fn new(
        name: impl Into<String>,
        group: impl Into<String>,
        latitude: f64,
        longitude: f64,
        color_tag: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            latitude,
            longitude,
            color_tag: color_tag.into(),
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.latitude, self.longitude)
    }

    /// True when both points share the same `(name, group)` identity
    pub fn same_identity(&self, other: &GeoPoint) -> bool {
        self.name == other.name && self.group == other.group
    }
}

/// Distance and initial bearing from one position to a catalog point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BearingResult {
    pub point: GeoPoint,
    pub distance_meters: f64,
    /// Initial bearing, clockwise from true North, in [0, 360)
    pub bearing_from_north_degrees: f64,
}

/// Device heading reported by an orientation sensor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadingSample {
    pub degrees_from_north: f64,
}

impl HeadingSample {
    pub fn new(degrees_from_north: f64) -> Self {
        Self { degrees_from_north }
    }
}

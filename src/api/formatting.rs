//! Display text and JSON output for compass snapshots
//!
//! Non-finite numbers never reach the screen: every formatter returns
//! `None` (or the unavailable placeholder) instead.

use crate::api::types::{CompassReading, CompassSnapshot, SelectionKind};
use crate::core::{CompassResult, KILOMETER_THRESHOLD_M};
use crate::processing::AngleReference;
use serde::Serialize;

/// Placeholder for values that cannot be computed
pub const UNAVAILABLE_TEXT: &str = "--";

const LOCATING_TEXT: &str = "位置情報を取得しています...";
const TRUE_NORTH_NOTE: &str =
    "方位センサーが利用できない場合は端末の向きに関係なく、北から見た方角を表示します。";

/// "999m" below one kilometer, "1.5km" from there on
pub fn format_distance(distance_meters: f64) -> Option<String> {
    if !distance_meters.is_finite() {
        return None;
    }

    if distance_meters < KILOMETER_THRESHOLD_M {
        Some(format!("{}m", distance_meters.round()))
    } else {
        Some(format!("{:.1}km", distance_meters / 1000.0))
    }
}

/// Whole-degree angle labelled with its zero direction
pub fn format_angle(degrees: f64, reference: AngleReference) -> Option<String> {
    if !degrees.is_finite() {
        return None;
    }

    let whole = (degrees.round() as i64).rem_euclid(360);
    let zero = match reference {
        AngleReference::TrueNorth => "北=0°",
        AngleReference::DeviceHeading => "端末の向き=0°",
    };
    Some(format!("{}° ({})", whole, zero))
}

/// Flattened view of a snapshot for machine-readable output
#[derive(Debug, Clone, Serialize)]
pub struct FormattedSnapshot {
    /// Target details, absent while locating
    pub reading: Option<FormattedReading>,
    /// Location failure message shown above the reading
    pub advisory: Option<String>,
    /// Whether an orientation sensor has reported
    pub heading_available: bool,
    /// Publish counter of the source snapshot
    pub sequence_number: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormattedReading {
    /// Station name
    pub station: String,
    /// Line serving the station
    pub line: String,
    /// Line color tag from the catalog
    pub line_color: String,
    /// Nearest or manually selected target
    pub mode: SelectionKind,
    /// Distance in meters, `None` when not finite
    pub distance_m: Option<f64>,
    /// Display text such as "350m" or "1.2km"
    pub distance_text: Option<String>,
    /// Bearing from true North in degrees
    pub bearing_deg: Option<f64>,
    /// Pointer angle relative to `reference`
    pub display_angle_deg: Option<f64>,
    /// Whole-degree pointer text with its zero direction
    pub angle_text: Option<String>,
    /// What the pointer angle is measured from
    pub reference: AngleReference,
    /// 16-point compass label of the bearing
    pub direction: Option<&'static str>,
}

impl FormattedReading {
    pub fn from_reading(reading: &CompassReading) -> Self {
        let finite = |v: f64| v.is_finite().then_some(v);
        let target = &reading.target;

        Self {
            station: target.point.name.clone(),
            line: target.point.group.clone(),
            line_color: target.point.color_tag.clone(),
            mode: reading.mode,
            distance_m: finite(target.distance_meters),
            distance_text: format_distance(target.distance_meters),
            bearing_deg: finite(target.bearing_from_north_degrees),
            display_angle_deg: finite(reading.display_angle),
            angle_text: format_angle(reading.display_angle, reading.reference),
            reference: reading.reference,
            direction: reading.direction,
        }
    }
}

impl FormattedSnapshot {
    pub fn from_snapshot(snapshot: &CompassSnapshot) -> Self {
        Self {
            reading: snapshot.reading.as_ref().map(FormattedReading::from_reading),
            advisory: snapshot.position_error.clone(),
            heading_available: snapshot.heading_available,
            sequence_number: snapshot.sequence_number,
        }
    }
}

/// Output renderer for snapshots
pub trait SnapshotFormatter {
    fn format(&self, snapshot: &CompassSnapshot) -> CompassResult<String>;
}

/// Multi-line, human-readable rendering
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    /// Append the true-North explanation when no heading is available
    pub show_reference_note: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self {
            show_reference_note: true,
        }
    }
}

impl SnapshotFormatter for TextFormatter {
    fn format(&self, snapshot: &CompassSnapshot) -> CompassResult<String> {
        let mut lines = Vec::new();

        if let Some(advisory) = &snapshot.position_error {
            lines.push(advisory.clone());
        } else if snapshot.reading.is_none() {
            lines.push(LOCATING_TEXT.to_string());
        }

        if let Some(reading) = &snapshot.reading {
            let heading = match reading.mode {
                SelectionKind::Nearest => "現在地に最も近い駅",
                SelectionKind::Manual => "選択中の駅",
            };
            let point = &reading.target.point;
            lines.push(format!("{}: {} ({})", heading, point.name, point.group));

            let distance = format_distance(reading.target.distance_meters);
            lines.push(format!(
                "距離: {}",
                distance.as_deref().unwrap_or(UNAVAILABLE_TEXT)
            ));

            let angle = format_angle(reading.display_angle, reading.reference);
            lines.push(format!(
                "方角: {} {}",
                angle.as_deref().unwrap_or(UNAVAILABLE_TEXT),
                reading.direction.unwrap_or(UNAVAILABLE_TEXT)
            ));

            if self.show_reference_note && reading.reference == AngleReference::TrueNorth {
                lines.push(TRUE_NORTH_NOTE.to_string());
            }
        }

        Ok(lines.join("\n"))
    }
}

/// JSON rendering of [`FormattedSnapshot`]
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    /// Serialize the flattened snapshot
    pub fn format_json(&self, snapshot: &CompassSnapshot) -> Result<String, serde_json::Error> {
        let formatted = FormattedSnapshot::from_snapshot(snapshot);
        if self.pretty {
            serde_json::to_string_pretty(&formatted)
        } else {
            serde_json::to_string(&formatted)
        }
    }
}

impl SnapshotFormatter for JsonFormatter {
    fn format(&self, snapshot: &CompassSnapshot) -> CompassResult<String> {
        Ok(self.format_json(snapshot)?)
    }
}

//! Physical constants and display parameters

/// Mean Earth radius used by the haversine formula (m)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Degrees in a full turn
pub const FULL_TURN_DEG: f64 = 360.0;

/// Width of one compass sector for a 16-point rose (degrees)
pub const COMPASS_SECTOR_DEG: f64 = FULL_TURN_DEG / 16.0;

/// Maximum number of search hits handed to the UI
pub const DEFAULT_SEARCH_LIMIT: usize = 8;

/// Distances below this are shown in meters, at or above in kilometers
pub const KILOMETER_THRESHOLD_M: f64 = 1000.0;

/// 16-point compass labels, clockwise from North
pub const COMPASS_LABELS: [&str; 16] = [
    "北", "北北東", "北東", "東北東",
    "東", "東南東", "南東", "南南東",
    "南", "南南西", "南西", "西南西",
    "西", "西北西", "北西", "北北西",
];

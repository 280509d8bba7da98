//! Station Compass
//!
//! Finds the transit station nearest to a live position and reports the
//! distance and compass bearing to it, combining the bearing with the
//! device heading when an orientation sensor is available.

pub mod core;
pub mod algorithms;
pub mod processing;
pub mod sensors;
pub mod api;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{
    BearingResult, Catalog, CompassError, CompassResult, GeoPoint, HeadingSample, Position,
    EARTH_RADIUS_M,
};
pub use crate::algorithms::{bearing_degrees, bearing_result_for, distance_meters, nearest};
pub use crate::processing::{
    direction_label, display_angle, normalize, relative_angle, AngleReference,
};
pub use crate::api::{
    format_distance, CompassReading, CompassSession, CompassSnapshot, SelectionKind,
    SelectionMode, SessionBinding,
};
pub use crate::utils::CompassConfig;

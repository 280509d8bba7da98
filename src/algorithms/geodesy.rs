//! Great-circle distance and initial bearing on a spherical Earth
//!
//! Inputs are not validated. Non-finite coordinates propagate as NaN, which
//! callers treat as "unavailable" rather than as an error.

use crate::core::{Position, EARTH_RADIUS_M};
use crate::processing::heading::normalize;

/// Haversine distance between two positions (m)
pub fn distance_meters(origin: &Position, target: &Position) -> f64 {
    let lat1 = origin.latitude.to_radians();
    let lat2 = target.latitude.to_radians();
    let delta_lat = (target.latitude - origin.latitude).to_radians();
    let delta_lon = (target.longitude - origin.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Initial bearing (forward azimuth) from origin to target, in [0, 360).
///
/// Coincident positions give atan2(0, 0) = 0, i.e. North.
pub fn bearing_degrees(origin: &Position, target: &Position) -> f64 {
    let lat1 = origin.latitude.to_radians();
    let lat2 = target.latitude.to_radians();
    let delta_lon = (target.longitude - origin.longitude).to_radians();

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

    normalize(y.atan2(x).to_degrees())
}

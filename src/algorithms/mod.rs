//! Geodesic computations and nearest-station search

pub mod geodesy;
pub mod nearest;

pub use geodesy::{bearing_degrees, distance_meters};
pub use nearest::{bearing_result_for, nearest};

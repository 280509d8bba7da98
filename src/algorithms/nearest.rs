//! Nearest-station search over the catalog
//!
//! Catalogs hold at most a few thousand stations and positions arrive at
//! roughly 1 Hz, so a linear scan is used instead of a spatial index.

use crate::algorithms::geodesy::{bearing_degrees, distance_meters};
use crate::core::{BearingResult, GeoPoint, Position};

/// Distance and bearing from `origin` to a single point.
///
/// Both values are computed from the same origin sample.
pub fn bearing_result_for(origin: &Position, point: &GeoPoint) -> BearingResult {
    let target = point.position();
    BearingResult {
        point: point.clone(),
        distance_meters: distance_meters(origin, &target),
        bearing_from_north_degrees: bearing_degrees(origin, &target),
    }
}

/// Closest point to `origin`, or `None` for an empty catalog.
///
/// A later point only wins with a strictly smaller distance, so ties go to
/// the point that comes first in catalog order. NaN distances never compare
/// smaller, which leaves the first point in place when every distance is NaN.
pub fn nearest<'a, I>(origin: &Position, catalog: I) -> Option<BearingResult>
where
    I: IntoIterator<Item = &'a GeoPoint>,
{
    let mut closest: Option<(&GeoPoint, f64)> = None;

    for point in catalog {
        let distance = distance_meters(origin, &point.position());
        match closest {
            None => closest = Some((point, distance)),
            Some((_, best)) if distance < best || (best.is_nan() && !distance.is_nan()) => {
                closest = Some((point, distance));
            }
            Some(_) => {}
        }
    }

    closest.map(|(point, _)| bearing_result_for(origin, point))
}

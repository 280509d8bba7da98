//! Heading reconciliation for the on-screen pointer
//!
//! Combines the absolute bearing to the target (clockwise from true North)
//! with the device heading, when one is available. Many platforms never
//! deliver a heading; in that case the pointer falls back to a true-North
//! reference and the reference is reported alongside the angle so the UI
//! can label it.

use crate::core::{COMPASS_LABELS, COMPASS_SECTOR_DEG, FULL_TURN_DEG};
use nalgebra::{Rotation2, Vector2};
use serde::{Deserialize, Serialize};

/// What "0 degrees" means for a display angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngleReference {
    /// 0 is true North; the device heading is unknown
    TrueNorth,
    /// 0 is straight ahead of the device
    DeviceHeading,
}

/// Map any angle into [0, 360). Non-finite input yields NaN.
pub fn normalize(degrees: f64) -> f64 {
    ((degrees % FULL_TURN_DEG) + FULL_TURN_DEG) % FULL_TURN_DEG
}

/// Clockwise rotation from the device's forward direction to the target
pub fn relative_angle(absolute_bearing: f64, heading: f64) -> f64 {
    normalize(absolute_bearing - heading)
}

/// Pointer angle for the display.
///
/// Relative to the device with a heading, relative to true North without.
pub fn display_angle(absolute_bearing: f64, heading: Option<f64>) -> f64 {
    reconcile(absolute_bearing, heading).0
}

/// Display angle together with the reference it is measured from
pub fn reconcile(absolute_bearing: f64, heading: Option<f64>) -> (f64, AngleReference) {
    match heading {
        Some(heading) => (
            relative_angle(absolute_bearing, heading),
            AngleReference::DeviceHeading,
        ),
        None => (normalize(absolute_bearing), AngleReference::TrueNorth),
    }
}

/// 16-point compass label for an angle.
///
/// Sector boundaries that fall exactly halfway round to the even index.
/// NaN maps to index 0; use [`try_direction_label`] when input may be
/// non-finite.
pub fn direction_label(degrees: f64) -> &'static str {
    let index = (normalize(degrees) / COMPASS_SECTOR_DEG).round_ties_even() as usize;
    COMPASS_LABELS[index % COMPASS_LABELS.len()]
}

pub fn try_direction_label(degrees: f64) -> Option<&'static str> {
    degrees.is_finite().then(|| direction_label(degrees))
}

/// Unit vector for an on-screen pointer rotated clockwise from straight up.
///
/// The frame is y-up: 0 degrees is (0, 1) and 90 degrees is (1, 0).
pub fn pointer_vector(display_angle: f64) -> Vector2<f64> {
    Rotation2::new(-display_angle.to_radians()) * Vector2::<f64>::y()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(0.0), 0.0);
        assert_eq!(normalize(360.0), 0.0);
        assert_eq!(normalize(370.0), 10.0);
        assert_eq!(normalize(-90.0), 270.0);
        assert_eq!(normalize(-720.0), 0.0);
        assert_eq!(normalize(-450.0), 270.0);
        assert!(normalize(f64::NAN).is_nan());
        assert!(normalize(f64::INFINITY).is_nan());
    }

    #[test]
    fn test_relative_angle_example() {
        assert_eq!(display_angle(90.0, Some(45.0)), 45.0);
        assert_eq!(relative_angle(90.0, 45.0), 45.0);
    }

    #[test]
    fn test_relative_angle_wraps() {
        assert_eq!(relative_angle(10.0, 350.0), 20.0);
        assert_eq!(relative_angle(350.0, 10.0), 340.0);
        assert_eq!(relative_angle(123.0, 123.0), 0.0);
    }

    #[test]
    fn test_display_angle_without_heading_uses_true_north() {
        assert_eq!(display_angle(-90.0, None), 270.0);
        assert_eq!(reconcile(45.0, None), (45.0, AngleReference::TrueNorth));
        assert_eq!(
            reconcile(45.0, Some(90.0)),
            (315.0, AngleReference::DeviceHeading)
        );
    }

    #[test]
    fn test_principal_directions() {
        assert_eq!(direction_label(0.0), "北");
        assert_eq!(direction_label(90.0), "東");
        assert_eq!(direction_label(180.0), "南");
        assert_eq!(direction_label(270.0), "西");
        assert_eq!(direction_label(360.0), "北");
        assert_eq!(direction_label(-90.0), "西");
    }

    #[test]
    fn test_every_sector_center() {
        for (i, label) in COMPASS_LABELS.iter().enumerate() {
            assert_eq!(direction_label(i as f64 * 22.5), *label);
        }
    }

    #[test]
    fn test_half_sector_boundaries_round_to_even() {
        // Boundary between sector i and i+1 sits at (i + 0.5) * 22.5
        let table = [
            (11.25, "北"),       // 0.5 -> 0
            (33.75, "北東"),     // 1.5 -> 2
            (56.25, "北東"),     // 2.5 -> 2
            (78.75, "東"),       // 3.5 -> 4
            (101.25, "東"),      // 4.5 -> 4
            (168.75, "南"),      // 7.5 -> 8
            (191.25, "南"),      // 8.5 -> 8
            (348.75, "北"),      // 15.5 -> 16 -> 0
        ];
        for (degrees, expected) in table {
            assert_eq!(direction_label(degrees), expected, "at {}", degrees);
        }
    }

    #[test]
    fn test_near_boundaries() {
        assert_eq!(direction_label(11.2), "北");
        assert_eq!(direction_label(11.3), "北北東");
        assert_eq!(direction_label(348.7), "北北西");
        assert_eq!(direction_label(359.9), "北");
    }

    #[test]
    fn test_try_direction_label() {
        assert_eq!(try_direction_label(45.0), Some("北東"));
        assert_eq!(try_direction_label(f64::NAN), None);
        assert_eq!(try_direction_label(f64::NEG_INFINITY), None);
    }

    #[test]
    fn test_pointer_vector() {
        let up = pointer_vector(0.0);
        assert!((up.x - 0.0).abs() < 1e-12 && (up.y - 1.0).abs() < 1e-12);

        let right = pointer_vector(90.0);
        assert!((right.x - 1.0).abs() < 1e-12 && right.y.abs() < 1e-12);

        let down = pointer_vector(180.0);
        assert!(down.x.abs() < 1e-12 && (down.y + 1.0).abs() < 1e-12);

        let left = pointer_vector(270.0);
        assert!((left.x + 1.0).abs() < 1e-12 && left.y.abs() < 1e-12);

        assert!((pointer_vector(123.4).norm() - 1.0).abs() < 1e-12);
    }
}

//! Sensor fusion for the compass display

pub mod heading;

pub use heading::{
    direction_label, display_angle, normalize, pointer_vector, reconcile, relative_angle,
    try_direction_label, AngleReference,
};

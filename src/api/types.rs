//! Types handed to the UI layer

use crate::core::BearingResult;
use crate::processing::AngleReference;
use serde::{Deserialize, Serialize};

pub use crate::core::{CompassError, CompassResult};

/// Which rule picked the current target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionKind {
    /// Closest catalog point, re-evaluated on every position sample
    Nearest,
    /// Point chosen explicitly by the user
    Manual,
}

/// Everything the UI needs to draw the compass for one target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompassReading {
    pub target: BearingResult,
    pub mode: SelectionKind,
    /// Pointer rotation in [0, 360), measured from `reference`
    pub display_angle: f64,
    pub reference: AngleReference,
    /// 16-point label of the absolute bearing, `None` if the bearing is not finite
    pub direction: Option<&'static str>,
}

impl CompassReading {
    /// False when any derived number is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.target.distance_meters.is_finite()
            && self.target.bearing_from_north_degrees.is_finite()
            && self.display_angle.is_finite()
    }
}

/// Derived compass state, recomputed after every sample or selection change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompassSnapshot {
    /// `None` until a position arrives, or when the catalog is empty
    pub reading: Option<CompassReading>,
    /// Persistent location advisory, cleared by the next good sample
    pub position_error: Option<String>,
    pub heading_available: bool,
    pub sequence_number: u32,
}

impl CompassSnapshot {
    /// Still waiting for the first position and nothing has gone wrong yet
    pub fn is_locating(&self) -> bool {
        self.reading.is_none() && self.position_error.is_none()
    }
}

/// Registration handle for snapshot listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackHandle(u32);

impl CallbackHandle {
    pub(crate) fn new(id: u32) -> Self {
        CallbackHandle(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

//! Nearest/Manual target selection

use crate::algorithms::{bearing_result_for, nearest};
use crate::api::types::SelectionKind;
use crate::core::{BearingResult, Catalog, CompassError, CompassResult, GeoPoint, Position};

/// Target selection state. Starts in `Nearest`.
///
/// Position updates never change the mode; only `select` and
/// `reset_to_nearest` do.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SelectionMode {
    #[default]
    Nearest,
    Manual(GeoPoint),
}

impl SelectionMode {
    pub fn kind(&self) -> SelectionKind {
        match self {
            SelectionMode::Nearest => SelectionKind::Nearest,
            SelectionMode::Manual(_) => SelectionKind::Manual,
        }
    }

    pub fn selected_point(&self) -> Option<&GeoPoint> {
        match self {
            SelectionMode::Nearest => None,
            SelectionMode::Manual(point) => Some(point),
        }
    }

    /// Enter Manual mode on a catalog member.
    ///
    /// The catalog's own record is stored, so a caller holding a stale copy
    /// with the same identity still ends up pointing at catalog data.
    pub fn select(&mut self, point: &GeoPoint, catalog: &Catalog) -> CompassResult<()> {
        let member = catalog
            .find(&point.name, &point.group)
            .ok_or_else(|| CompassError::UnknownPoint {
                name: point.name.clone(),
                group: point.group.clone(),
            })?;

        *self = SelectionMode::Manual(member.clone());
        Ok(())
    }

    pub fn reset_to_nearest(&mut self) {
        *self = SelectionMode::Nearest;
    }

    /// Current target as seen from `origin`
    pub fn resolve_target(&self, origin: &Position, catalog: &Catalog) -> Option<BearingResult> {
        match self {
            SelectionMode::Nearest => nearest(origin, catalog),
            SelectionMode::Manual(point) => Some(bearing_result_for(origin, point)),
        }
    }
}

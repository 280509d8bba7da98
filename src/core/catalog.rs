//! Static station catalog
//!
//! The catalog is loaded once at startup and never mutated afterwards.
//! Order is significant: nearest-station ties and search results both
//! follow the order of the source asset.

use crate::core::{CompassError, CompassResult, GeoPoint, DEFAULT_SEARCH_LIMIT};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Station list bundled with the crate
const BUILTIN_CATALOG: &str = include_str!("../../data/stations.json");

/// Immutable, ordered list of points of interest
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    points: Vec<GeoPoint>,
}

impl Catalog {
    /// Build a catalog from points, rejecting duplicate `(name, group)` pairs
    pub fn new(points: Vec<GeoPoint>) -> CompassResult<Self> {
        let mut seen = HashSet::with_capacity(points.len());
        for point in &points {
            if !seen.insert((point.name.as_str(), point.group.as_str())) {
                return Err(CompassError::Catalog {
                    reason: format!("duplicate point {} ({})", point.name, point.group),
                });
            }
        }

        Ok(Self { points })
    }

    /// Parse a JSON array of point records
    pub fn from_json_str(json: &str) -> CompassResult<Self> {
        let points: Vec<GeoPoint> = serde_json::from_str(json)?;
        let catalog = Self::new(points)?;
        debug!(points = catalog.len(), "parsed catalog");
        Ok(catalog)
    }

    /// Load a catalog asset from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> CompassResult<Self> {
        let content = fs::read_to_string(&path)?;
        let catalog = Self::from_json_str(&content)?;
        info!(
            path = %path.as_ref().display(),
            points = catalog.len(),
            "loaded station catalog"
        );
        Ok(catalog)
    }

    /// The catalog shipped in `data/stations.json`
    pub fn builtin() -> CompassResult<Self> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GeoPoint> {
        self.points.iter()
    }

    /// Whether a point with the same identity is in the catalog
    pub fn contains(&self, point: &GeoPoint) -> bool {
        self.points.iter().any(|p| p.same_identity(point))
    }

    pub fn find(&self, name: &str, group: &str) -> Option<&GeoPoint> {
        self.points
            .iter()
            .find(|p| p.name == name && p.group == group)
    }

    /// Case-sensitive substring search on point names.
    ///
    /// Results keep catalog order and are capped at `limit`.
    pub fn search(&self, term: &str, limit: usize) -> Vec<&GeoPoint> {
        self.points
            .iter()
            .filter(|p| p.name.contains(term))
            .take(limit)
            .collect()
    }

    /// Search with the default display cap
    pub fn search_default(&self, term: &str) -> Vec<&GeoPoint> {
        self.search(term, DEFAULT_SEARCH_LIMIT)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a GeoPoint;
    type IntoIter = std::slice::Iter<'a, GeoPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

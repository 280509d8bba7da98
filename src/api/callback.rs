//! Callback-driven compass session
//!
//! The session keeps only the latest position, heading and location error.
//! Every incoming sample or selection change recomputes the snapshot from
//! those and pushes it to the registered listeners. Nothing is queued: a
//! new sample replaces the old one outright.

use crate::api::selection::SelectionMode;
use crate::api::types::{CallbackHandle, CompassReading, CompassSnapshot};
use crate::core::{
    BearingResult, Catalog, CompassError, CompassResult, GeoPoint, HeadingSample, Position,
};
use crate::processing::{reconcile, try_direction_label};
use crate::sensors::{HeadingSource, PositionEvent, PositionSource, WatchId};
use crate::utils::CompassConfig;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use tracing::{debug, info, warn};

/// Listener for recomputed snapshots.
///
/// Listeners run while the session is borrowed and must not call back into it.
pub type SnapshotCallback = Box<dyn Fn(&CompassSnapshot)>;

/// Compass state machine fed by position and heading samples
pub struct CompassSession {
    /// Stations the target is chosen from
    catalog: Catalog,
    /// Search and watch settings
    config: CompassConfig,
    /// Nearest or pinned target
    selection: SelectionMode,
    /// Latest position sample
    position: Option<Position>,
    /// Latest heading sample
    heading: Option<HeadingSample>,
    /// Standing location failure message
    position_error: Option<String>,
    /// Incremented on every publish
    sequence_counter: u32,
    /// Last issued listener handle id, never reused
    callback_counter: u32,
    /// Registered snapshot listeners
    snapshot_callbacks: HashMap<CallbackHandle, SnapshotCallback>,
}

impl CompassSession {
    pub fn new(catalog: Catalog, config: CompassConfig) -> Self {
        info!(points = catalog.len(), "compass session created");
        Self {
            catalog,
            config,
            selection: SelectionMode::default(),
            position: None,
            heading: None,
            position_error: None,
            sequence_counter: 0,
            callback_counter: 0,
            snapshot_callbacks: HashMap::new(),
        }
    }

    /// Session over the bundled catalog with default configuration
    pub fn with_builtin_catalog() -> CompassResult<Self> {
        Ok(Self::new(Catalog::builtin()?, CompassConfig::default()))
    }

    pub fn register_snapshot_callback(&mut self, callback: SnapshotCallback) -> CallbackHandle {
        self.callback_counter += 1;
        let handle = CallbackHandle::new(self.callback_counter);
        self.snapshot_callbacks.insert(handle, callback);
        handle
    }

    pub fn unregister_callback(&mut self, handle: CallbackHandle) -> CompassResult<()> {
        match self.snapshot_callbacks.remove(&handle) {
            Some(_) => Ok(()),
            None => Err(CompassError::InvalidHandle { id: handle.id() }),
        }
    }

    pub fn callback_count(&self) -> usize {
        self.snapshot_callbacks.len()
    }

    /// Accept a new position sample. Clears any standing location error.
    pub fn on_position(&mut self, position: Position) {
        self.position = Some(position);
        if self.position_error.take().is_some() {
            info!("position recovered");
        }
        self.publish();
    }

    /// Record that the platform cannot supply a location.
    ///
    /// The last known position, if any, is kept; no retry happens here.
    pub fn on_position_unavailable(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(%reason, "position unavailable");
        self.position_error = Some(reason);
        self.publish();
    }

    pub fn on_position_event(&mut self, event: PositionEvent) {
        match event {
            PositionEvent::Sample(position) => self.on_position(position),
            PositionEvent::Unavailable { reason } => self.on_position_unavailable(reason),
        }
    }

    pub fn on_heading(&mut self, sample: HeadingSample) {
        self.heading = Some(sample);
        self.publish();
    }

    /// Pin the target to a catalog point until reset
    pub fn select(&mut self, point: &GeoPoint) -> CompassResult<()> {
        self.selection.select(point, &self.catalog)?;
        info!(name = %point.name, group = %point.group, "manual selection");
        self.publish();
        Ok(())
    }

    pub fn reset_to_nearest(&mut self) {
        self.selection.reset_to_nearest();
        info!("selection reset to nearest");
        self.publish();
    }

    /// Case-sensitive name search, capped to the configured limit
    pub fn search(&self, term: &str) -> Vec<GeoPoint> {
        self.catalog
            .search(term, self.config.search_limit)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn selection(&self) -> &SelectionMode {
        &self.selection
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &CompassConfig {
        &self.config
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn heading(&self) -> Option<HeadingSample> {
        self.heading
    }

    /// Target for the latest position, `None` before the first sample
    pub fn current_target(&self) -> Option<BearingResult> {
        let origin = self.position.as_ref()?;
        self.selection.resolve_target(origin, &self.catalog)
    }

    pub fn snapshot(&self) -> CompassSnapshot {
        CompassSnapshot {
            reading: self.current_reading(),
            position_error: self.position_error.clone(),
            heading_available: self.heading.is_some(),
            sequence_number: self.sequence_counter,
        }
    }

    /// Drop listeners and all sample state; the catalog stays loaded.
    ///
    /// Handle ids keep counting so a handle from before shutdown stays invalid.
    pub fn shutdown(&mut self) {
        self.snapshot_callbacks.clear();
        self.selection = SelectionMode::default();
        self.position = None;
        self.heading = None;
        self.position_error = None;
        self.sequence_counter = 0;
        debug!("compass session shut down");
    }

    fn current_reading(&self) -> Option<CompassReading> {
        let target = self.current_target()?;
        let heading = self.heading.map(|h| h.degrees_from_north);
        let (display_angle, reference) = reconcile(target.bearing_from_north_degrees, heading);

        Some(CompassReading {
            direction: try_direction_label(target.bearing_from_north_degrees),
            mode: self.selection.kind(),
            display_angle,
            reference,
            target,
        })
    }

    fn publish(&mut self) {
        self.sequence_counter = self.sequence_counter.wrapping_add(1);
        if self.snapshot_callbacks.is_empty() {
            return;
        }

        let snapshot = self.snapshot();
        debug!(
            sequence = snapshot.sequence_number,
            has_reading = snapshot.reading.is_some(),
            "publishing snapshot"
        );
        for callback in self.snapshot_callbacks.values() {
            callback(&snapshot);
        }
    }
}

/// Live subscriptions connecting sensor sources to a session.
///
/// Must be released with the same sources when the display goes away.
#[derive(Debug)]
pub struct SessionBinding {
    position_watch: WatchId,
    heading_watch: Option<WatchId>,
}

impl SessionBinding {
    /// Subscribe `session` to a position source and, if present, a heading source.
    ///
    /// Callbacks hold a weak reference, so a dropped session simply stops
    /// receiving samples.
    pub fn attach(
        session: &Rc<RefCell<CompassSession>>,
        position_source: &mut dyn PositionSource,
        heading_source: Option<&mut dyn HeadingSource>,
    ) -> Self {
        let options = session.borrow().config().watch;

        let weak: Weak<RefCell<CompassSession>> = Rc::downgrade(session);
        let position_watch = position_source.watch_position(
            &options,
            Box::new(move |event| {
                if let Some(session) = weak.upgrade() {
                    session.borrow_mut().on_position_event(event);
                }
            }),
        );

        let heading_watch = heading_source.map(|source| {
            let weak = Rc::downgrade(session);
            source.watch_heading(Box::new(move |sample| {
                if let Some(session) = weak.upgrade() {
                    session.borrow_mut().on_heading(sample);
                }
            }))
        });

        debug!(
            position_watch = position_watch.id(),
            heading_watch = ?heading_watch.map(|w| w.id()),
            "session attached to sources"
        );
        Self {
            position_watch,
            heading_watch,
        }
    }

    pub fn position_watch(&self) -> WatchId {
        self.position_watch
    }

    pub fn heading_watch(&self) -> Option<WatchId> {
        self.heading_watch
    }

    /// Unsubscribe from both sources
    pub fn release(
        self,
        position_source: &mut dyn PositionSource,
        heading_source: Option<&mut dyn HeadingSource>,
    ) {
        if !position_source.clear_watch(self.position_watch) {
            warn!(watch = self.position_watch.id(), "position watch already cleared");
        }
        if let (Some(source), Some(watch)) = (heading_source, self.heading_watch) {
            if !source.clear_watch(watch) {
                warn!(watch = watch.id(), "heading watch already cleared");
            }
        }
        debug!("session detached from sources");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::SelectionKind;
    use crate::processing::AngleReference;
    use crate::sensors::{ManualHeadingSource, ManualPositionSource, REASON_FAILED};

    fn two_point_session() -> CompassSession {
        let catalog = Catalog::new(vec![
            GeoPoint::new("A", "L1", 35.001, 139.0, "#111111"),
            GeoPoint::new("B", "L1", 35.01, 139.0, "#222222"),
        ])
        .unwrap();
        CompassSession::new(catalog, CompassConfig::default())
    }

    fn recorder(session: &mut CompassSession) -> Rc<RefCell<Vec<CompassSnapshot>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        session.register_snapshot_callback(Box::new(move |s| sink.borrow_mut().push(s.clone())));
        seen
    }

    #[test]
    fn test_locating_before_first_sample() {
        let session = two_point_session();
        let snapshot = session.snapshot();
        assert!(snapshot.is_locating());
        assert!(!snapshot.heading_available);
    }

    #[test]
    fn test_position_produces_nearest_reading() {
        let mut session = two_point_session();
        session.on_position(Position::new(35.0, 139.0));

        let reading = session.snapshot().reading.unwrap();
        assert_eq!(reading.target.point.name, "A");
        assert_eq!(reading.mode, SelectionKind::Nearest);
        assert_eq!(reading.reference, AngleReference::TrueNorth);
        assert_eq!(reading.direction, Some("北"));
        assert!(reading.is_finite());
    }

    #[test]
    fn test_heading_switches_reference() {
        let mut session = two_point_session();
        session.on_position(Position::new(35.0, 139.0));
        session.on_heading(HeadingSample::new(90.0));

        let snapshot = session.snapshot();
        let reading = snapshot.reading.unwrap();
        assert!(snapshot.heading_available);
        assert_eq!(reading.reference, AngleReference::DeviceHeading);
        assert!((reading.display_angle - 270.0).abs() < 1e-9);
        // Direction label stays tied to true North
        assert_eq!(reading.direction, Some("北"));
    }

    #[test]
    fn test_heading_before_position_has_no_reading() {
        let mut session = two_point_session();
        session.on_heading(HeadingSample::new(10.0));
        let snapshot = session.snapshot();
        assert!(snapshot.reading.is_none());
        assert!(snapshot.heading_available);
    }

    #[test]
    fn test_manual_selection_persists_across_position_update() {
        let mut session = two_point_session();
        session.on_position(Position::new(35.0, 139.0));
        let b = session.catalog().find("B", "L1").unwrap().clone();
        session.select(&b).unwrap();

        session.on_position(Position::new(35.0005, 139.0));
        let reading = session.snapshot().reading.unwrap();
        assert_eq!(reading.target.point.name, "B");
        assert_eq!(reading.mode, SelectionKind::Manual);

        session.reset_to_nearest();
        assert_eq!(session.current_target().unwrap().point.name, "A");
    }

    #[test]
    fn test_select_unknown_point_keeps_mode() {
        let mut session = two_point_session();
        let result = session.select(&GeoPoint::new("Z", "L9", 0.0, 0.0, ""));
        assert!(matches!(result, Err(CompassError::UnknownPoint { .. })));
        assert_eq!(session.selection().kind(), SelectionKind::Nearest);
    }

    #[test]
    fn test_position_error_is_persistent_until_next_sample() {
        let mut session = two_point_session();
        session.on_position(Position::new(35.0, 139.0));
        session.on_position_unavailable(REASON_FAILED);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.position_error.as_deref(), Some(REASON_FAILED));
        assert!(snapshot.reading.is_some());

        session.on_heading(HeadingSample::new(0.0));
        assert!(session.snapshot().position_error.is_some());

        session.on_position(Position::new(35.0, 139.0));
        assert!(session.snapshot().position_error.is_none());
    }

    #[test]
    fn test_empty_catalog_yields_no_reading() {
        let mut session = CompassSession::new(Catalog::default(), CompassConfig::default());
        session.on_position(Position::new(35.0, 139.0));
        let snapshot = session.snapshot();
        assert!(snapshot.reading.is_none());
        assert!(snapshot.position_error.is_none());
    }

    #[test]
    fn test_nan_position_gives_non_finite_reading() {
        let mut session = two_point_session();
        session.on_position(Position::new(f64::NAN, 139.0));
        let reading = session.snapshot().reading.unwrap();
        assert!(!reading.is_finite());
        assert_eq!(reading.direction, None);
    }

    #[test]
    fn test_listeners_notified_with_increasing_sequence() {
        let mut session = two_point_session();
        let seen = recorder(&mut session);

        session.on_position(Position::new(35.0, 139.0));
        session.on_heading(HeadingSample::new(45.0));
        session.reset_to_nearest();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].sequence_number, 1);
        assert_eq!(seen[2].sequence_number, 3);
        assert!(!seen[0].heading_available);
        assert!(seen[1].heading_available);
    }

    #[test]
    fn test_unregister_stops_notifications() {
        let mut session = two_point_session();
        let seen = Rc::new(RefCell::new(0));
        let counter = seen.clone();
        let handle = session.register_snapshot_callback(Box::new(move |_| {
            *counter.borrow_mut() += 1;
        }));

        session.on_position(Position::new(35.0, 139.0));
        session.unregister_callback(handle).unwrap();
        session.on_position(Position::new(35.0, 139.0));

        assert_eq!(*seen.borrow(), 1);
        assert!(matches!(
            session.unregister_callback(handle),
            Err(CompassError::InvalidHandle { .. })
        ));
    }

    #[test]
    fn test_search_uses_configured_limit() {
        let config = CompassConfig {
            search_limit: 2,
            ..Default::default()
        };
        let session = CompassSession::new(Catalog::builtin().unwrap(), config);
        assert_eq!(session.search("").len(), 2);
        assert_eq!(session.search("上野").len(), 2);
        assert!(session.search("Ueno").is_empty());
    }

    #[test]
    fn test_shutdown_clears_state() {
        let mut session = two_point_session();
        let _seen = recorder(&mut session);
        session.on_position(Position::new(35.0, 139.0));
        session.shutdown();

        assert_eq!(session.callback_count(), 0);
        assert!(session.snapshot().is_locating());
        assert_eq!(session.catalog().len(), 2);
    }

    #[test]
    fn test_handle_from_before_shutdown_is_invalid() {
        let mut session = two_point_session();
        let stale = session.register_snapshot_callback(Box::new(|_| {}));
        session.shutdown();
        let fresh = session.register_snapshot_callback(Box::new(|_| {}));

        assert_ne!(stale, fresh);
        assert!(matches!(
            session.unregister_callback(stale),
            Err(CompassError::InvalidHandle { .. })
        ));
        assert_eq!(session.callback_count(), 1);
        assert!(session.unregister_callback(fresh).is_ok());
    }

    #[test]
    fn test_binding_routes_samples_and_releases() {
        let session = Rc::new(RefCell::new(two_point_session()));
        let mut positions = ManualPositionSource::new();
        let mut headings = ManualHeadingSource::new();

        let binding = SessionBinding::attach(&session, &mut positions, Some(&mut headings));
        assert_eq!(positions.active_watches(), 1);
        assert_eq!(headings.active_watches(), 1);
        assert_eq!(positions.last_options(), Some(&session.borrow().config().watch));

        positions.emit_position(35.0, 139.0);
        headings.emit(90.0);
        let reading = session.borrow().snapshot().reading.unwrap();
        assert_eq!(reading.target.point.name, "A");
        assert_eq!(reading.reference, AngleReference::DeviceHeading);

        binding.release(&mut positions, Some(&mut headings));
        assert_eq!(positions.active_watches(), 0);
        assert_eq!(headings.active_watches(), 0);

        // Samples after release no longer reach the session
        positions.emit_position(35.02, 139.0);
        assert_eq!(session.borrow().position(), Some(Position::new(35.0, 139.0)));
    }

    #[test]
    fn test_binding_without_heading_source() {
        let session = Rc::new(RefCell::new(two_point_session()));
        let mut positions = ManualPositionSource::new();

        let binding = SessionBinding::attach(&session, &mut positions, None);
        assert!(binding.heading_watch().is_none());

        positions.emit_unavailable(REASON_FAILED);
        assert_eq!(
            session.borrow().snapshot().position_error.as_deref(),
            Some(REASON_FAILED)
        );

        binding.release(&mut positions, None);
        assert_eq!(positions.active_watches(), 0);
    }

    #[test]
    fn test_dropped_session_ignores_samples() {
        let session = Rc::new(RefCell::new(two_point_session()));
        let mut positions = ManualPositionSource::new();
        let _binding = SessionBinding::attach(&session, &mut positions, None);

        drop(session);
        positions.emit_position(35.0, 139.0);
        assert_eq!(positions.delivered_count(), 1);
    }
}

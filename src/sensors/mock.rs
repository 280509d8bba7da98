//! Scripted sources for tests and the command-line demo

use crate::core::{HeadingSample, Position};
use crate::sensors::{
    HeadingCallback, HeadingSource, PositionCallback, PositionEvent, PositionSource, WatchId,
    WatchOptions,
};
use std::collections::BTreeMap;

/// Position source driven by explicit `emit` calls
#[derive(Default)]
pub struct ManualPositionSource {
    next_id: u32,
    watches: BTreeMap<WatchId, PositionCallback>,
    last_options: Option<WatchOptions>,
    delivered: u32,
}

impl ManualPositionSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an event to every active watch
    pub fn emit(&mut self, event: PositionEvent) {
        for callback in self.watches.values_mut() {
            callback(event.clone());
            self.delivered += 1;
        }
    }

    pub fn emit_position(&mut self, latitude: f64, longitude: f64) {
        self.emit(PositionEvent::Sample(Position::new(latitude, longitude)));
    }

    pub fn emit_unavailable(&mut self, reason: impl Into<String>) {
        self.emit(PositionEvent::Unavailable {
            reason: reason.into(),
        });
    }

    pub fn active_watches(&self) -> usize {
        self.watches.len()
    }

    /// Options passed with the most recent watch request
    pub fn last_options(&self) -> Option<&WatchOptions> {
        self.last_options.as_ref()
    }

    /// Total number of callback invocations
    pub fn delivered_count(&self) -> u32 {
        self.delivered
    }
}

impl PositionSource for ManualPositionSource {
    fn watch_position(&mut self, options: &WatchOptions, callback: PositionCallback) -> WatchId {
        self.next_id += 1;
        let id = WatchId::new(self.next_id);
        self.watches.insert(id, callback);
        self.last_options = Some(*options);
        id
    }

    fn clear_watch(&mut self, id: WatchId) -> bool {
        self.watches.remove(&id).is_some()
    }
}

/// Heading source driven by explicit `emit` calls
#[derive(Default)]
pub struct ManualHeadingSource {
    next_id: u32,
    watches: BTreeMap<WatchId, HeadingCallback>,
}

impl ManualHeadingSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, degrees_from_north: f64) {
        let sample = HeadingSample::new(degrees_from_north);
        for callback in self.watches.values_mut() {
            callback(sample);
        }
    }

    pub fn active_watches(&self) -> usize {
        self.watches.len()
    }
}

impl HeadingSource for ManualHeadingSource {
    fn watch_heading(&mut self, callback: HeadingCallback) -> WatchId {
        self.next_id += 1;
        let id = WatchId::new(self.next_id);
        self.watches.insert(id, callback);
        id
    }

    fn clear_watch(&mut self, id: WatchId) -> bool {
        self.watches.remove(&id).is_some()
    }
}

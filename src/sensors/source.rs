//! Position and heading source traits
//!
//! Sources push samples to registered callbacks until the watch is cleared.
//! Everything runs on one thread; callbacks are invoked synchronously from
//! whatever drives the source.

use crate::core::{HeadingSample, Position};
use serde::{Deserialize, Serialize};

/// Shown when the platform has no location capability at all
pub const REASON_NOT_SUPPORTED: &str = "この端末では位置情報が利用できません";

/// Shown when the platform refuses or fails to deliver a fix
pub const REASON_FAILED: &str = "位置情報の取得に失敗しました";

/// Identifier returned by a source for one registered watch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchId(u32);

impl WatchId {
    pub fn new(id: u32) -> Self {
        WatchId(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

/// One delivery from a position source
#[derive(Debug, Clone, PartialEq)]
pub enum PositionEvent {
    Sample(Position),
    /// The platform denied or lacks the capability
    Unavailable { reason: String },
}

/// Request parameters handed to the platform location service
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WatchOptions {
    /// Prefer GNSS over coarse network positioning
    pub enable_high_accuracy: bool,
    /// Oldest cached fix the platform may return (milliseconds)
    pub maximum_age_ms: u32,
    /// Time allowed for each fix before reporting a failure (milliseconds)
    pub timeout_ms: u32,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            maximum_age_ms: 10_000,
            timeout_ms: 10_000,
        }
    }
}

pub type PositionCallback = Box<dyn FnMut(PositionEvent)>;
pub type HeadingCallback = Box<dyn FnMut(HeadingSample)>;

/// Live location stream
pub trait PositionSource {
    /// Start delivering position events to `callback`
    fn watch_position(&mut self, options: &WatchOptions, callback: PositionCallback) -> WatchId;

    /// Stop delivery for a watch. Returns false if the id was not active.
    fn clear_watch(&mut self, id: WatchId) -> bool;
}

/// Live device orientation stream. Many platforms never emit anything.
pub trait HeadingSource {
    fn watch_heading(&mut self, callback: HeadingCallback) -> WatchId;

    fn clear_watch(&mut self, id: WatchId) -> bool;
}

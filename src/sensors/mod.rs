//! Abstraction over the platform's live location and orientation streams

pub mod source;
pub mod mock;

pub use source::{
    HeadingCallback, HeadingSource, PositionCallback, PositionEvent, PositionSource, WatchId,
    WatchOptions, REASON_FAILED, REASON_NOT_SUPPORTED,
};
pub use mock::{ManualHeadingSource, ManualPositionSource};

//! Interface offered to the UI layer
//!
//! The UI feeds samples into a [`CompassSession`] (directly or through a
//! [`SessionBinding`]), drives selection, and renders the resulting
//! snapshots with one of the formatters.

pub mod callback;
pub mod formatting;
pub mod selection;
pub mod types;

pub use callback::{CompassSession, SessionBinding, SnapshotCallback};
pub use formatting::{
    format_angle, format_distance, FormattedReading, FormattedSnapshot, JsonFormatter,
    SnapshotFormatter, TextFormatter,
};
pub use selection::SelectionMode;
pub use types::{
    CallbackHandle, CompassError, CompassReading, CompassResult, CompassSnapshot, SelectionKind,
};

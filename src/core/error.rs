//! Error types shared across the compass

/// Result type for compass operations
pub type CompassResult<T> = Result<T, CompassError>;

/// Errors surfaced by the compass core and its loaders.
///
/// A missing heading sensor and an empty catalog are not errors; they have
/// their own representation in the snapshot.
#[derive(Debug, thiserror::Error)]
pub enum CompassError {
    /// Platform cannot or will not supply a location
    #[error("Position unavailable: {reason}")]
    PositionUnavailable { reason: String },

    /// Selected point is not part of the catalog
    #[error("Unknown point: {name} ({group})")]
    UnknownPoint { name: String, group: String },

    /// Callback handle was never registered or already removed
    #[error("Invalid callback handle: {id}")]
    InvalidHandle { id: u32 },

    /// Catalog asset is structurally valid JSON but unusable
    #[error("Invalid catalog: {reason}")]
    Catalog { reason: String },

    /// Configuration parameter failed validation
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    Config {
        parameter: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CompassError {
    pub fn position_unavailable(reason: impl Into<String>) -> Self {
        CompassError::PositionUnavailable {
            reason: reason.into(),
        }
    }
}

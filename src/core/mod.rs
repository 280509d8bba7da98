//! Core types, constants and the station catalog

pub mod types;
pub mod constants;
pub mod catalog;
pub mod error;

pub use types::*;
pub use constants::*;
pub use catalog::Catalog;
pub use error::{CompassError, CompassResult};

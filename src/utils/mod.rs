//! Configuration and logging

pub mod config;
pub mod logging;

pub use config::CompassConfig;
pub use logging::init_logging;

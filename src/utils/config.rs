//! Session configuration loaded from JSON

use crate::core::{Catalog, CompassError, CompassResult, DEFAULT_SEARCH_LIMIT};
use crate::sensors::WatchOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Longest search result list the UI is willing to lay out
const MAX_SEARCH_LIMIT: usize = 50;

/// Runtime configuration for a compass session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompassConfig {
    /// Station catalog to load instead of the bundled one
    pub catalog_path: Option<PathBuf>,
    /// Maximum number of station search hits returned to the UI
    pub search_limit: usize,
    /// Options forwarded to the position source
    pub watch: WatchOptions,
    /// Default tracing filter when RUST_LOG is not set
    pub log_filter: String,
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            search_limit: DEFAULT_SEARCH_LIMIT,
            watch: WatchOptions::default(),
            log_filter: "station_compass=info".to_string(),
        }
    }
}

impl CompassConfig {
    /// Load and validate a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> CompassResult<Self> {
        let content = fs::read_to_string(&path)?;
        let config: CompassConfig = serde_json::from_str(&content)?;
        config.validate()?;

        info!(path = %path.as_ref().display(), "loaded configuration");
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> CompassResult<()> {
        self.validate()?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;

        debug!(path = %path.as_ref().display(), "saved configuration");
        Ok(())
    }

    pub fn validate(&self) -> CompassResult<()> {
        if self.search_limit == 0 || self.search_limit > MAX_SEARCH_LIMIT {
            return Err(CompassError::Config {
                parameter: "search_limit".to_string(),
                value: self.search_limit.to_string(),
                reason: format!("must be between 1 and {}", MAX_SEARCH_LIMIT),
            });
        }

        if self.watch.timeout_ms == 0 {
            return Err(CompassError::Config {
                parameter: "watch.timeout_ms".to_string(),
                value: self.watch.timeout_ms.to_string(),
                reason: "must be positive".to_string(),
            });
        }

        if self.log_filter.trim().is_empty() {
            return Err(CompassError::Config {
                parameter: "log_filter".to_string(),
                value: self.log_filter.clone(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Catalog named by `catalog_path`, or the bundled one
    pub fn load_catalog(&self) -> CompassResult<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::from_file(path),
            None => Catalog::builtin(),
        }
    }
}

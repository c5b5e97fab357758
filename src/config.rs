//! Dashboard configuration

use crate::error::PortfolioResult;
use crate::metrics::HealthWeights;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default directory holding the four dataset files
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default cache lifetime (one hour)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_cache_ttl_secs() -> Option<u64> {
    Some(DEFAULT_CACHE_TTL_SECS)
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

/// Runtime configuration, loadable from a JSON file
///
/// Every field is optional in the file; missing fields take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Directory containing clients.csv, engagements.csv, deliverables.csv
    /// and monthly_summaries.csv
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Seconds a loaded snapshot stays fresh (`null` = until refreshed)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: Option<u64>,

    /// Health score weights
    #[serde(default)]
    pub health_weights: HealthWeights,

    /// chrono format string for dates in text output
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            cache_ttl_secs: default_cache_ttl_secs(),
            health_weights: HealthWeights::default(),
            date_format: default_date_format(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> PortfolioResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> PortfolioResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_secs.map(Duration::from_secs)
    }

    /// Override the data directory
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}

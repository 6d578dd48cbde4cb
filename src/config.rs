//! TOML configuration for the check binary.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::location::AcquisitionPolicy;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub boundary: BoundaryConfig,
    #[serde(default)]
    pub location: LocationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BoundaryConfig {
    /// HTTPS URL or local path of the GeoJSON boundary document
    pub source: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LocationConfig {
    pub primary_timeout_secs: u64,
    pub secondary_timeout_secs: u64,
    pub max_sample_age_secs: u64,
    pub high_accuracy: bool,
}

impl Default for LocationConfig {
    fn default() -> Self {
        let policy = AcquisitionPolicy::default();
        Self {
            primary_timeout_secs: policy.primary_timeout.as_secs(),
            secondary_timeout_secs: policy.secondary_timeout.as_secs(),
            max_sample_age_secs: policy.max_sample_age.as_secs(),
            high_accuracy: policy.high_accuracy,
        }
    }
}

impl LocationConfig {
    pub fn policy(&self) -> AcquisitionPolicy {
        AcquisitionPolicy {
            primary_timeout: Duration::from_secs(self.primary_timeout_secs),
            secondary_timeout: Duration::from_secs(self.secondary_timeout_secs),
            max_sample_age: Duration::from_secs(self.max_sample_age_secs),
            high_accuracy: self.high_accuracy,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

//! Configuration parsing and validation.
//!
//! Handles loading configuration from YAML files and validating the run
//! parameters before the pipeline starts. The filter timestamp is parsed
//! at load time, so an unparsable value aborts startup instead of
//! reaching the pipeline.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use std::path::Path;

use crate::error::{
    ConfigError, EmptyDistrictSnafu, EmptyLogPathSnafu, EmptySinkPathSnafu, EmptySourcePathSnafu,
    ReadFileSnafu, YamlParseSnafu,
};

/// Main configuration structure for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    pub sink: SinkConfig,
    /// Run log configuration (optional, defaults to `waybill.log`).
    #[serde(default)]
    pub run_log: RunLogConfig,
    pub filter: FilterConfig,
}

/// Source configuration for reading order records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to the newline-delimited JSON input file.
    pub path: String,
}

/// Sink configuration for writing matched records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Path to the output file. Replaced on every run.
    pub path: String,
}

/// Run log configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunLogConfig {
    /// Path to the run log file (default: "waybill.log").
    #[serde(default = "default_log_path")]
    pub path: String,
}

impl Default for RunLogConfig {
    fn default() -> Self {
        Self {
            path: default_log_path(),
        }
    }
}

fn default_log_path() -> String {
    "waybill.log".to_string()
}

/// Filter parameters applied to the order set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// District to keep, matched exactly (case-sensitive, no trimming).
    pub district: String,
    /// Inclusive lower bound on delivery time, e.g. "2024-08-01T17:23:14".
    pub not_before: NaiveDateTime,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).context(ReadFileSnafu)?;
        let config: Config = serde_yaml::from_str(&content).context(YamlParseSnafu)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the run parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure!(!self.source.path.is_empty(), EmptySourcePathSnafu);
        ensure!(!self.sink.path.is_empty(), EmptySinkPathSnafu);
        ensure!(!self.run_log.path.is_empty(), EmptyLogPathSnafu);
        ensure!(!self.filter.district.is_empty(), EmptyDistrictSnafu);
        Ok(())
    }
}

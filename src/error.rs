//! Error types for waybill using snafu.
//!
//! This module defines structured error types with context selectors for
//! all error conditions in the codebase. Reader and writer errors never
//! reach `main`: the pipeline consumes them into run log entries.

use snafu::prelude::*;

// ============ Config Errors ============

/// Errors that can occur during configuration parsing and validation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConfigError {
    /// Source path is empty.
    #[snafu(display("Source path cannot be empty"))]
    EmptySourcePath,

    /// Sink path is empty.
    #[snafu(display("Sink path cannot be empty"))]
    EmptySinkPath,

    /// Run log path is empty.
    #[snafu(display("Run log path cannot be empty"))]
    EmptyLogPath,

    /// District filter is empty.
    #[snafu(display("District filter cannot be empty"))]
    EmptyDistrict,

    /// Failed to read configuration file.
    #[snafu(display("Failed to read configuration file"))]
    ReadFile { source: std::io::Error },

    /// Failed to parse YAML configuration.
    #[snafu(display("Failed to parse YAML configuration"))]
    YamlParse { source: serde_yaml::Error },
}

// ============ Reader Errors ============

/// Errors that can occur while reading the input file.
///
/// Per-line decode failures are not errors at this level; they are
/// tolerated, logged, and counted by the reader.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ReaderError {
    /// Failed to open the input file.
    #[snafu(display("Failed to open input file {path}: {source}"))]
    Open {
        path: String,
        source: std::io::Error,
    },

    /// Failed to read a line from the input file.
    #[snafu(display("Failed to read line from {path}: {source}"))]
    ReadLine {
        path: String,
        source: std::io::Error,
    },
}

// ============ Writer Errors ============

/// Errors that can occur while writing the output file.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum WriterError {
    /// Failed to create the output file.
    #[snafu(display("Failed to create output file {path}: {source}"))]
    Create {
        path: String,
        source: std::io::Error,
    },

    /// Failed to write a record to the output file.
    #[snafu(display("Failed to write record to {path}: {source}"))]
    WriteRecord {
        path: String,
        source: std::io::Error,
    },

    /// Failed to flush the output file.
    #[snafu(display("Failed to flush output file {path}: {source}"))]
    Flush {
        path: String,
        source: std::io::Error,
    },
}

// ============ Run Log Errors ============

/// Errors that can occur while setting up the run log.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
// Prefix is intentional to avoid snafu selector conflicts (e.g., CreateSnafu)
pub enum LogError {
    /// Failed to create the run log file.
    #[snafu(display("Failed to create run log file {path}"))]
    CreateLog {
        path: String,
        source: std::io::Error,
    },
}

// ============ Pipeline Error (top-level) ============

/// Top-level errors that can reach the entry point.
///
/// Only startup failures appear here; once the pipeline is running,
/// every failure ends in a run log entry instead.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum PipelineError {
    /// Configuration error.
    #[snafu(display("Configuration error"))]
    Config { source: ConfigError },

    /// Run log setup error.
    #[snafu(display("Run log error"))]
    RunLog { source: LogError },
}

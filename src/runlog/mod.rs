//! The run log capability.
//!
//! Progress and error messages for a run are recorded through the
//! [`RunLog`] trait. The production implementation appends to a log file
//! and echoes to the console; implementations are free to fan out to
//! other sinks, and the pipeline never assumes which.

use async_trait::async_trait;
use chrono::Local;
use snafu::prelude::*;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::{CreateLogSnafu, LogError};

/// Capability for recording run progress and errors.
#[async_trait]
pub trait RunLog: Send + Sync {
    /// Durably record a message.
    async fn log(&self, message: &str);
}

/// File-backed run log that also echoes messages to the console.
///
/// Each call opens the log file in append mode, writes one
/// timestamp-prefixed line, and releases the handle, so the file is
/// never held open between calls.
pub struct FileLog {
    path: PathBuf,
}

impl FileLog {
    /// Create a run log at `path`, truncating any previous content.
    pub async fn create(path: impl Into<PathBuf>) -> Result<Self, LogError> {
        let path = path.into();
        tokio::fs::File::create(&path).await.context(CreateLogSnafu {
            path: path.display().to_string(),
        })?;
        Ok(Self { path })
    }

    async fn append(&self, line: &str) -> std::io::Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }
}

#[async_trait]
impl RunLog for FileLog {
    async fn log(&self, message: &str) {
        info!("{message}");

        let line = format!("{}: {}\n", Local::now().format("%Y-%m-%d %H:%M:%S"), message);
        if let Err(e) = self.append(&line).await {
            warn!("Failed to append to run log {}: {}", self.path.display(), e);
        }
    }
}

/// In-memory run log that captures messages for tests.
#[derive(Debug, Default)]
pub struct MemoryLog {
    messages: Mutex<Vec<String>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded so far, in order.
    pub async fn messages(&self) -> Vec<String> {
        self.messages.lock().await.clone()
    }
}

#[async_trait]
impl RunLog for MemoryLog {
    async fn log(&self, message: &str) {
        self.messages.lock().await.push(message.to_string());
    }
}

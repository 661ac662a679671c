//! Sink writer for matched orders.
//!
//! Writes one JSON-encoded order per line, in input order. A record
//! that fails to serialize is reported to the run log and omitted; the
//! remaining records are still written.

use snafu::prelude::*;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use crate::error::{CreateSnafu, FlushSnafu, WriteRecordSnafu, WriterError};
use crate::order::Order;
use crate::runlog::RunLog;

/// Result of writing an output file.
#[derive(Debug)]
pub struct WriteSummary {
    /// Records written to the output file.
    pub records_written: usize,
    /// Records omitted because they failed to serialize.
    pub records_dropped: usize,
}

/// Write orders to a line-delimited JSON file, replacing its content.
///
/// The destination is truncated even when `orders` is empty. Records
/// flushed before an I/O failure stay written.
pub async fn write_orders(
    orders: &[Order],
    path: &Path,
    log: &dyn RunLog,
) -> Result<WriteSummary, WriterError> {
    let display_path = path.display().to_string();
    let file = File::create(path).await.context(CreateSnafu {
        path: display_path.as_str(),
    })?;
    let mut writer = BufWriter::new(file);

    let mut summary = WriteSummary {
        records_written: 0,
        records_dropped: 0,
    };

    for order in orders {
        let line = match serde_json::to_string(order) {
            Ok(line) => line,
            Err(e) => {
                summary.records_dropped += 1;
                log.log(&format!("error: order {}: {e}", order.id)).await;
                continue;
            }
        };

        writer.write_all(line.as_bytes()).await.context(WriteRecordSnafu {
            path: display_path.as_str(),
        })?;
        writer.write_all(b"\n").await.context(WriteRecordSnafu {
            path: display_path.as_str(),
        })?;
        summary.records_written += 1;
    }

    writer.flush().await.context(FlushSnafu {
        path: display_path.as_str(),
    })?;

    debug!("Wrote {} orders to {}", summary.records_written, display_path);
    Ok(summary)
}

//! Source reader for newline-delimited order files.
//!
//! Reads one JSON-encoded order per line, tolerating bad input: a line
//! that fails to decode is reported to the run log and skipped, and
//! reading continues with the rest of the file. Only I/O failures abort
//! the read.

use snafu::prelude::*;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::error::{OpenSnafu, ReadLineSnafu, ReaderError};
use crate::order::{self, Decoded, Order};
use crate::runlog::RunLog;

/// Result of reading an input file.
#[derive(Debug)]
pub struct ReadSummary {
    /// Successfully decoded orders, in input order.
    pub orders: Vec<Order>,
    /// Non-blank lines seen.
    pub lines_read: usize,
    /// Lines that failed to decode, or decoded to null.
    pub lines_skipped: usize,
}

/// Read all orders from a line-delimited JSON file.
///
/// Line order is preserved. Blank lines are ignored. A line that decodes
/// to JSON `null` is counted as skipped and excluded from the working
/// set; no placeholder record is substituted for it.
pub async fn read_orders(path: &Path, log: &dyn RunLog) -> Result<ReadSummary, ReaderError> {
    let display_path = path.display().to_string();
    let file = File::open(path).await.context(OpenSnafu {
        path: display_path.as_str(),
    })?;
    let mut lines = BufReader::new(file).lines();

    let mut summary = ReadSummary {
        orders: Vec::new(),
        lines_read: 0,
        lines_skipped: 0,
    };
    let mut line_number = 0usize;

    while let Some(line) = lines.next_line().await.context(ReadLineSnafu {
        path: display_path.as_str(),
    })? {
        line_number += 1;
        if line.trim().is_empty() {
            continue;
        }
        summary.lines_read += 1;

        match order::decode_line(&line) {
            Ok(Decoded::Order(order)) => summary.orders.push(order),
            Ok(Decoded::Absent) => {
                summary.lines_skipped += 1;
                log.log(&format!("error: line {line_number}: record is null, skipping"))
                    .await;
            }
            Err(e) => {
                summary.lines_skipped += 1;
                log.log(&format!("error: line {line_number}: {e}")).await;
            }
        }
    }

    debug!(
        "Read {} orders from {} ({} lines skipped)",
        summary.orders.len(),
        display_path,
        summary.lines_skipped
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runlog::MemoryLog;
    use tempfile::TempDir;

    async fn read_fixture(content: &str) -> (ReadSummary, Vec<String>) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("orders.ndjson");
        std::fs::write(&path, content).unwrap();

        let log = MemoryLog::new();
        let summary = read_orders(&path, &log).await.unwrap();
        (summary, log.messages().await)
    }

    #[tokio::test]
    async fn test_reads_orders_in_input_order() {
        let content = "\
{\"id\":1,\"weight\":1.0,\"district\":\"d1\",\"deliveryTime\":\"2024-12-01T17:14:21\"}
{\"id\":2,\"weight\":2.0,\"district\":\"d3\",\"deliveryTime\":\"2024-07-01T17:11:10\"}
{\"id\":3,\"weight\":3.0,\"district\":\"d5\",\"deliveryTime\":\"2024-03-01T17:09:12\"}
";
        let (summary, messages) = read_fixture(content).await;

        assert_eq!(summary.lines_read, 3);
        assert_eq!(summary.lines_skipped, 0);
        let ids: Vec<i64> = summary.orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_line_is_logged_and_skipped() {
        let content = "\
{\"id\":1,\"weight\":1.0,\"district\":\"d1\",\"deliveryTime\":\"2024-12-01T17:14:21\"}
this is not json
{\"id\":3,\"weight\":3.0,\"district\":\"d5\",\"deliveryTime\":\"2024-03-01T17:09:12\"}
";
        let (summary, messages) = read_fixture(content).await;

        assert_eq!(summary.lines_read, 3);
        assert_eq!(summary.lines_skipped, 1);
        let ids: Vec<i64> = summary.orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 3]);

        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("line 2"));
    }

    #[tokio::test]
    async fn test_null_line_is_skipped_without_placeholder() {
        let content = "\
null
{\"id\":2,\"weight\":2.0,\"district\":\"d3\",\"deliveryTime\":\"2024-07-01T17:11:10\"}
";
        let (summary, messages) = read_fixture(content).await;

        assert_eq!(summary.lines_skipped, 1);
        assert_eq!(summary.orders.len(), 1);
        assert_eq!(summary.orders[0].id, 2);
        // The working set never contains a fabricated record
        assert!(summary.orders.iter().all(|o| o.district != "failed read"));
        assert!(messages[0].contains("null"));
    }

    #[tokio::test]
    async fn test_blank_lines_are_ignored() {
        let content =
            "\n{\"id\":1,\"weight\":1.0,\"district\":\"d1\",\"deliveryTime\":\"2024-12-01T17:14:21\"}\n\n\n";
        let (summary, messages) = read_fixture(content).await;

        assert_eq!(summary.lines_read, 1);
        assert_eq!(summary.lines_skipped, 0);
        assert_eq!(summary.orders.len(), 1);
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("does-not-exist.ndjson");

        let log = MemoryLog::new();
        let result = read_orders(&path, &log).await;
        assert!(matches!(result, Err(ReaderError::Open { .. })));
    }
}

//! Main processing pipeline.
//!
//! Connects the source, filter, and sink stages into a single
//! sequential run: read all orders, keep the ones matching the
//! configured district and minimum delivery time, write them out, and
//! report summary counts through the run log.
//!
//! The stages run strictly one after another; the only concurrency in
//! the design is structural (file and log operations suspend instead of
//! blocking the hosting thread).

use chrono::NaiveDateTime;
use snafu::prelude::*;
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{PipelineError, RunLogSnafu};
use crate::order::Order;
use crate::runlog::{FileLog, RunLog};
use crate::sink::write_orders;
use crate::source::read_orders;

/// Statistics about a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Non-blank input lines seen.
    pub lines_read: usize,
    /// Orders successfully decoded.
    pub orders_read: usize,
    /// Input lines skipped (malformed or null).
    pub lines_skipped: usize,
    /// Orders matching the filter.
    pub orders_matched: usize,
    /// Matched orders written to the sink.
    pub records_written: usize,
    /// Matched orders dropped by serialization failures.
    pub records_dropped: usize,
}

/// Keep the orders for `district` delivered at or after `not_before`.
///
/// Pure and total: input order is preserved, nothing is mutated, and an
/// order whose delivery time equals the bound is included.
pub fn filter_orders(orders: &[Order], district: &str, not_before: NaiveDateTime) -> Vec<Order> {
    orders
        .iter()
        .filter(|o| o.district == district && o.delivery_time >= not_before)
        .cloned()
        .collect()
}

/// Main processing pipeline.
pub struct Pipeline {
    config: Config,
    log: Arc<dyn RunLog>,
}

impl Pipeline {
    /// Create a new pipeline from configuration and a run log.
    pub fn new(config: Config, log: Arc<dyn RunLog>) -> Self {
        Self { config, log }
    }

    /// Run the pipeline.
    ///
    /// Never returns an error: invalid run parameters and I/O failures
    /// are recorded through the run log and end the run early, leaving
    /// any already-written output in place.
    pub async fn process(&self) -> PipelineStats {
        let mut stats = PipelineStats::default();

        if let Err(e) = self.config.validate() {
            self.log
                .log(&format!("error: invalid run parameters: {e}"))
                .await;
            return stats;
        }

        let summary =
            match read_orders(Path::new(&self.config.source.path), self.log.as_ref()).await {
                Ok(summary) => summary,
                Err(e) => {
                    self.log.log(&format!("error: {e}")).await;
                    return stats;
                }
            };
        stats.lines_read = summary.lines_read;
        stats.orders_read = summary.orders.len();
        stats.lines_skipped = summary.lines_skipped;

        let matched = filter_orders(
            &summary.orders,
            &self.config.filter.district,
            self.config.filter.not_before,
        );
        stats.orders_matched = matched.len();

        match write_orders(&matched, Path::new(&self.config.sink.path), self.log.as_ref()).await {
            Ok(written) => {
                stats.records_written = written.records_written;
                stats.records_dropped = written.records_dropped;
            }
            Err(e) => {
                self.log.log(&format!("error: {e}")).await;
                return stats;
            }
        }

        self.log
            .log(&format!("orders processed: {}", stats.orders_read))
            .await;
        self.log
            .log(&format!("matching orders found: {}", stats.orders_matched))
            .await;

        stats
    }
}

/// Run the pipeline with the given configuration.
///
/// Creates the file-backed run log at the configured path; failing to
/// create it is a startup error, reported before the pipeline begins.
pub async fn run_pipeline(config: Config) -> Result<PipelineStats, PipelineError> {
    let log = FileLog::create(config.run_log.path.as_str())
        .await
        .context(RunLogSnafu)?;
    let pipeline = Pipeline::new(config, Arc::new(log));
    Ok(pipeline.process().await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    fn order(id: i64, district: &str, delivery_time: &str) -> Order {
        Order {
            id,
            weight: 1.0,
            district: district.to_string(),
            delivery_time: dt(delivery_time),
        }
    }

    fn calibration_orders() -> Vec<Order> {
        vec![
            order(1, "d1", "2024-12-01T17:14:21"),
            order(2, "d3", "2024-07-01T17:11:10"),
            order(3, "d5", "2024-03-01T17:09:12"),
            order(4, "d2", "2024-08-01T17:23:13"),
            order(5, "d2", "2024-09-01T17:17:14"),
            order(6, "d2", "2024-11-01T17:16:15"),
            order(7, "d4", "2024-01-01T17:18:16"),
            order(8, "d4", "2024-04-01T17:01:57"),
            order(9, "d5", "2024-02-01T17:02:58"),
            order(10, "d3", "2024-05-01T17:03:59"),
        ]
    }

    #[test]
    fn test_filter_single_district_match() {
        let matched = filter_orders(&calibration_orders(), "d1", dt("2022-03-01T17:09:12"));
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, 1);
    }

    #[test]
    fn test_filter_empty_district_matches_nothing() {
        let matched = filter_orders(&calibration_orders(), "", dt("2022-03-01T17:09:12"));
        assert!(matched.is_empty());
    }

    #[test]
    fn test_filter_future_cutoff_matches_nothing() {
        let matched = filter_orders(&calibration_orders(), "d2", dt("2025-03-01T17:09:12"));
        assert!(matched.is_empty());
    }

    #[test]
    fn test_filter_cutoff_excludes_by_one_second() {
        // The d2 order at 17:23:13 misses the 17:23:14 cutoff
        let matched = filter_orders(&calibration_orders(), "d2", dt("2024-08-01T17:23:14"));
        let ids: Vec<i64> = matched.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![5, 6]);
    }

    #[test]
    fn test_filter_boundary_is_inclusive() {
        let matched = filter_orders(&calibration_orders(), "d2", dt("2024-08-01T17:23:13"));
        let ids: Vec<i64> = matched.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![4, 5, 6]);
    }

    #[test]
    fn test_filter_preserves_order_and_records() {
        let orders = calibration_orders();
        let matched = filter_orders(&orders, "d2", dt("2024-01-01T00:00:00"));

        let ids: Vec<i64> = matched.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![4, 5, 6]);
        // Matched records are the originals, unmodified
        assert_eq!(matched[0], orders[3]);
        // Inputs are untouched
        assert_eq!(orders.len(), 10);
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        let orders = vec![order(1, "D2", "2024-09-01T17:17:14")];
        assert!(filter_orders(&orders, "d2", dt("2024-01-01T00:00:00")).is_empty());
    }

    #[test]
    fn test_pipeline_stats_default() {
        let stats = PipelineStats::default();
        assert_eq!(stats.orders_read, 0);
        assert_eq!(stats.orders_matched, 0);
    }
}

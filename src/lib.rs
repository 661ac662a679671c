//! waybill: A library for filtering delivery order files.
//!
//! This library provides components for reading newline-delimited JSON
//! order records, filtering them by district and minimum delivery time,
//! and writing the matches back out with per-record fault tolerance.
//!
//! # Example
//!
//! ```ignore
//! use waybill::{Config, run_pipeline, error::PipelineError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), PipelineError> {
//!     let config = Config::from_file("waybill.yaml")?;
//!     let stats = run_pipeline(config).await?;
//!     println!("Matched {} orders", stats.orders_matched);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod order;
pub mod pipeline;
pub mod runlog;
pub mod sink;
pub mod source;

// Re-export main types
pub use config::Config;
pub use order::Order;
pub use pipeline::{Pipeline, PipelineStats, filter_orders, run_pipeline};
pub use runlog::{FileLog, MemoryLog, RunLog};

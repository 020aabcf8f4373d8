//! Election Perf Report - latency charts for mixnet elections
//!
//! Reads the timing samples written by the election performance harness
//! (one row per node and run: `n,t1,t2`, durations in microseconds) and
//! renders two bar charts against the number of mixnet nodes:
//!
//! - **t1.png**: time to initialize the election
//! - **t2.png**: time to conclude the election (mix and tally)
//!
//! # Architecture
//!
//! - **Dataset**: CSV loading, unit scaling and sentinel filtering
//! - **Stats**: per node count mean and bootstrap confidence interval
//! - **Visualization**: plotters-backed PNG bar charts
//! - **Report**: the load → scale → filter → plot pipeline
//! - **Output**: optional CSV, JSON and Excel summaries
//!
//! # Example
//!
//! ```rust,no_run
//! use election_perf_report::{ReportConfig, ReportGenerator};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ReportConfig::default().with_input("perf0.csv");
//!     let summaries = ReportGenerator::new(config).run()?;
//!
//!     for summary in &summaries {
//!         println!("{}: {} bars", summary.title, summary.bars.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod output;
pub mod report;
pub mod stats;
pub mod visualization;

// Re-export commonly used types
pub use config::{BootstrapConfig, ConfigError, RenderSettings, ReportConfig};
pub use dataset::{Sample, TimingTable};
pub use error::{ReportError, Result};
pub use output::{CsvExporter, ExcelExporter, JsonExporter};
pub use report::{ChartSpec, ChartSummary, ReportGenerator};
pub use stats::{BarEstimator, BarStats};
pub use visualization::{BarChart, BarChartPlotter, ChartRenderer};

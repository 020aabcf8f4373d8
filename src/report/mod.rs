//! Election latency report
//!
//! Loads the timing table once, scales every metric column, then renders
//! one chart per [`ChartSpec`] in order. Each chart looks up its own
//! column, so a broken second column only stops the second chart.

use crate::config::ReportConfig;
use crate::dataset::TimingTable;
use crate::error::Result;
use crate::stats::{BarEstimator, BarStats};
use crate::visualization::{BarChart, BarChartPlotter, ChartRenderer};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[cfg(test)]
mod tests;

/// X axis description shared by every chart
pub const X_DESC: &str = "Number of Mixnet Nodes";

/// Y axis description shared by every chart
pub const Y_DESC: &str = "Time [s]";

/// One chart of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Metric column plotted on the y axis
    pub column: String,
    /// Chart caption
    pub title: String,
    /// Image file name inside the output directory
    pub file_name: String,
}

impl ChartSpec {
    /// Create a chart spec
    pub fn new(
        column: impl Into<String>,
        title: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            title: title.into(),
            file_name: file_name.into(),
        }
    }

    /// Initialization time (`t1`) and mix-and-tally time (`t2`)
    pub fn election_charts(total_nodes: Option<u32>) -> Vec<Self> {
        vec![
            Self::new(
                "t1",
                with_total_nodes("Time to Initialize Election", total_nodes),
                "t1.png",
            ),
            Self::new(
                "t2",
                with_total_nodes("Time to Conclude Election (Mix and Tally)", total_nodes),
                "t2.png",
            ),
        ]
    }
}

fn with_total_nodes(title: &str, total_nodes: Option<u32>) -> String {
    match total_nodes {
        Some(total) => format!("{} ({} total nodes)", title, total),
        None => title.to_string(),
    }
}

/// Result of rendering one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSummary {
    /// Chart caption
    pub title: String,
    /// Metric column the bars were computed from
    pub column: String,
    /// Path of the written image
    pub output: PathBuf,
    /// Bars in drawing order
    pub bars: Vec<BarStats>,
}

/// Turns a timing CSV into bar charts
pub struct ReportGenerator<R = BarChartPlotter> {
    config: ReportConfig,
    charts: Vec<ChartSpec>,
    estimator: BarEstimator,
    renderer: R,
}

impl ReportGenerator<BarChartPlotter> {
    /// Create a generator that writes PNG files
    pub fn new(config: ReportConfig) -> Self {
        let renderer = BarChartPlotter::new(config.render);
        Self::with_renderer(config, renderer)
    }
}

impl<R: ChartRenderer> ReportGenerator<R> {
    /// Create a generator with a custom renderer
    pub fn with_renderer(config: ReportConfig, renderer: R) -> Self {
        Self {
            charts: ChartSpec::election_charts(config.total_nodes),
            estimator: BarEstimator::new(config.bootstrap),
            config,
            renderer,
        }
    }

    /// Replace the chart list
    pub fn with_charts(mut self, charts: Vec<ChartSpec>) -> Self {
        self.charts = charts;
        self
    }

    /// Charts rendered by [`ReportGenerator::run`], in order
    pub fn charts(&self) -> &[ChartSpec] {
        &self.charts
    }

    /// The configuration in use
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// The renderer in use
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Load the input file and scale every metric column
    pub fn load(&self) -> Result<TimingTable> {
        let columns: Vec<&str> = self.charts.iter().map(|c| c.column.as_str()).collect();
        let mut table =
            TimingTable::from_path(&self.config.input, &self.config.node_column, &columns)?;
        table.scale(self.config.divisor);

        tracing::info!(
            "Loaded {} rows from {}",
            table.len(),
            self.config.input.display()
        );
        Ok(table)
    }

    /// Load, scale and render every chart
    ///
    /// Stops at the first failure; charts already written stay on disk.
    pub fn run(&mut self) -> Result<Vec<ChartSummary>> {
        self.config.validate()?;
        let table = self.load()?;
        self.render_all(&table)
    }

    /// Render every chart from an already scaled table
    pub fn render_all(&mut self, table: &TimingTable) -> Result<Vec<ChartSummary>> {
        let charts = self.charts.clone();
        charts
            .iter()
            .map(|spec| self.render_chart(table, spec))
            .collect()
    }

    /// Render a single chart
    pub fn render_chart(&mut self, table: &TimingTable, spec: &ChartSpec) -> Result<ChartSummary> {
        let samples = table.positive_samples(&spec.column)?;
        let dropped = table.len() - samples.len();
        if dropped > 0 {
            tracing::debug!(
                "Skipping {} unmeasured rows in column '{}'",
                dropped,
                spec.column
            );
        }

        let bars = self.estimator.estimate(&samples);
        if bars.is_empty() {
            tracing::warn!("No positive values in column '{}'", spec.column);
        }

        let output = self.config.output_dir.join(&spec.file_name);
        let chart = BarChart {
            title: &spec.title,
            x_desc: X_DESC,
            y_desc: Y_DESC,
            bars: &bars,
        };
        self.renderer.render(&chart, &output)?;

        tracing::info!(
            "Wrote '{}' ({} bars) to {}",
            spec.title,
            bars.len(),
            output.display()
        );

        Ok(ChartSummary {
            title: spec.title.clone(),
            column: spec.column.clone(),
            output,
            bars,
        })
    }
}

//! Timing dataset loading
//!
//! The performance harness writes one row per node and run:
//!
//! ```text
//! n,t1,t2
//! 3,10234567,20456789
//! ```
//!
//! `n` is the number of mixnet nodes in the run, the remaining columns are
//! raw phase durations. The node column is required up front; metric
//! columns are looked up by name when a chart asks for them, so a report
//! can get as far as the data allows before failing.

use crate::error::{ReportError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A single measurement kept for plotting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Number of mixnet nodes
    pub nodes: u32,
    /// Scaled metric value
    pub value: f64,
}

/// In-memory table of timing measurements
#[derive(Debug, Clone, Default)]
pub struct TimingTable {
    nodes: Vec<u32>,
    series: BTreeMap<String, Vec<f64>>,
}

impl TimingTable {
    /// Load a table from a CSV file
    pub fn from_path(path: &Path, node_column: &str, metric_columns: &[&str]) -> Result<Self> {
        let file = File::open(path)?;
        let table = Self::from_reader(file, node_column, metric_columns)?;

        tracing::debug!(
            "Loaded {} rows from {} ({} metric columns)",
            table.len(),
            path.display(),
            table.series.len()
        );

        Ok(table)
    }

    /// Load a table from any CSV source
    ///
    /// Columns not named in `metric_columns` are ignored. Empty or
    /// missing trailing metric cells load as NaN and never pass
    /// [`TimingTable::positive_samples`].
    pub fn from_reader<R: Read>(
        rdr: R,
        node_column: &str,
        metric_columns: &[&str],
    ) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(rdr);

        let headers = reader.headers()?.clone();
        let node_idx = column_index(&headers, node_column)
            .ok_or_else(|| ReportError::missing_column(node_column))?;

        let metrics: Vec<(&str, usize)> = metric_columns
            .iter()
            .filter_map(|&name| column_index(&headers, name).map(|idx| (name, idx)))
            .collect();

        for &name in metric_columns {
            if column_index(&headers, name).is_none() {
                tracing::warn!("Column '{}' not present in input", name);
            }
        }

        let mut nodes = Vec::new();
        let mut series: BTreeMap<String, Vec<f64>> = metrics
            .iter()
            .map(|(name, _)| (name.to_string(), Vec::new()))
            .collect();

        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();

            let raw = record.get(node_idx).unwrap_or_default();
            let n = raw.parse::<u32>().map_err(|_| ReportError::InvalidValue {
                line,
                column: node_column.to_string(),
                value: raw.to_string(),
            })?;
            nodes.push(n);

            for &(name, idx) in &metrics {
                let raw = record.get(idx).unwrap_or_default();
                let value = parse_metric(raw).ok_or_else(|| ReportError::InvalidValue {
                    line,
                    column: name.to_string(),
                    value: raw.to_string(),
                })?;
                if let Some(values) = series.get_mut(name) {
                    values.push(value);
                }
            }
        }

        Ok(Self { nodes, series })
    }

    /// Divide every metric value by `divisor`, in place
    pub fn scale(&mut self, divisor: f64) {
        for values in self.series.values_mut() {
            for value in values.iter_mut() {
                *value /= divisor;
            }
        }
    }

    /// Node count of every row, in file order
    pub fn nodes(&self) -> &[u32] {
        &self.nodes
    }

    /// Values of a metric column, in file order
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.series
            .get(name)
            .map(|values| values.as_slice())
            .ok_or_else(|| ReportError::missing_column(name))
    }

    /// Check whether a metric column was loaded
    pub fn has_column(&self, name: &str) -> bool {
        self.series.contains_key(name)
    }

    /// Rows of `name` whose value is strictly positive
    ///
    /// Zero and negative timings mean "not measured" and are dropped.
    pub fn positive_samples(&self, name: &str) -> Result<Vec<Sample>> {
        let values = self.column(name)?;
        Ok(self
            .nodes
            .iter()
            .zip(values)
            .filter(|&(_, &value)| value > 0.0)
            .map(|(&nodes, &value)| Sample { nodes, value })
            .collect())
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn parse_metric(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return Some(f64::NAN);
    }
    raw.parse::<f64>().ok()
}

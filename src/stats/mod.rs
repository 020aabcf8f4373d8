//! Per-bar aggregation
//!
//! Samples are grouped by node count. Each group becomes one bar whose
//! height is the mean and whose error bar is a percentile bootstrap
//! confidence interval of that mean.

use crate::config::BootstrapConfig;
use crate::dataset::Sample;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregated statistics for one bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarStats {
    /// Number of mixnet nodes
    pub nodes: u32,
    /// Number of samples behind the bar
    pub count: usize,
    /// Mean of the samples
    pub mean: f64,
    /// Lower bound of the confidence interval
    pub ci_low: f64,
    /// Upper bound of the confidence interval
    pub ci_high: f64,
}

/// Computes bar heights and error bars from raw samples
#[derive(Debug, Clone)]
pub struct BarEstimator {
    config: BootstrapConfig,
}

impl BarEstimator {
    /// Create an estimator
    pub fn new(config: BootstrapConfig) -> Self {
        Self { config }
    }

    /// One bar per distinct node count, ordered by node count
    ///
    /// The RNG is reseeded on every call, so the same samples always
    /// produce the same intervals.
    pub fn estimate(&self, samples: &[Sample]) -> Vec<BarStats> {
        let mut groups: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for sample in samples {
            groups.entry(sample.nodes).or_default().push(sample.value);
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);

        groups
            .into_iter()
            .map(|(nodes, values)| {
                let mean = mean(&values);
                let (ci_low, ci_high) = self.bootstrap_interval(&values, mean, &mut rng);
                BarStats {
                    nodes,
                    count: values.len(),
                    mean,
                    ci_low,
                    ci_high,
                }
            })
            .collect()
    }

    fn bootstrap_interval(&self, values: &[f64], mean: f64, rng: &mut StdRng) -> (f64, f64) {
        if values.len() < 2 {
            return (mean, mean);
        }

        let n = values.len();
        let mut means: Vec<f64> = (0..self.config.resamples)
            .map(|_| {
                let sum: f64 = (0..n).map(|_| values[rng.gen_range(0..n)]).sum();
                sum / n as f64
            })
            .collect();
        means.sort_by(|a, b| a.total_cmp(b));

        let tail = (1.0 - self.config.confidence) / 2.0 * 100.0;
        (percentile(&means, tail), percentile(&means, 100.0 - tail))
    }
}

impl Default for BarEstimator {
    fn default() -> Self {
        Self::new(BootstrapConfig::default())
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Percentile of sorted data with linear interpolation between ranks
pub fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted_data.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted_data[lo] + (sorted_data[hi] - sorted_data[lo]) * frac
}

//! CLI argument parsing and command handling

use crate::config::ReportConfig;
use crate::output::{CsvExporter, ExcelExporter, JsonExporter};
use crate::report::{ChartSummary, ReportGenerator};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Election latency report - bar charts of mixnet election timings
///
/// With no arguments, reads `perf0.csv` and writes `t1.png` and `t2.png`
/// into the current directory.
#[derive(Parser, Debug, Default)]
#[command(name = "perf-report")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// CSV file with columns n, t1, t2 [default: perf0.csv]
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory for charts and summaries [default: .]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// JSON config file; flags given here override it
    #[arg(short, long, env = "PERF_REPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Total cluster size, appended to the chart titles
    #[arg(long)]
    pub total_nodes: Option<u32>,

    /// Image resolution in dots per inch [default: 300]
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Seed for the bootstrap confidence intervals [default: 0]
    #[arg(long)]
    pub seed: Option<u64>,

    /// Export bar statistics to CSV
    #[arg(long)]
    pub csv: bool,

    /// Export bar statistics to JSON
    #[arg(long)]
    pub json: bool,

    /// Export bar statistics to Excel (.xlsx)
    #[arg(long)]
    pub excel: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Generate the report based on CLI arguments
    pub fn run(&self) -> Result<()> {
        let config = self.resolve_config()?;
        config.validate().context("Invalid report configuration")?;

        tracing::info!("Input: {}", config.input.display());
        tracing::info!("Output directory: {}", config.output_dir.display());

        println!("\n{}", "=".repeat(70));
        println!("   Election Performance Report");
        println!("{}", "=".repeat(70));
        println!();
        println!("Configuration:");
        println!("  Input:        {}", config.input.display());
        println!("  Output:       {}", config.output_dir.display());
        println!("  Divisor:      {}", config.divisor);
        println!("  Resolution:   {} dpi", config.render.dpi);
        println!(
            "  Error bars:   {:.0}% CI, {} resamples, seed {}",
            config.bootstrap.confidence * 100.0,
            config.bootstrap.resamples,
            config.bootstrap.seed
        );
        println!("{}", "=".repeat(70));
        println!();

        std::fs::create_dir_all(&config.output_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                config.output_dir.display()
            )
        })?;

        let input = config.input.clone();
        let output_dir = config.output_dir.clone();

        let mut generator = ReportGenerator::new(config);
        let summaries = generator
            .run()
            .with_context(|| format!("Failed to generate report from: {}", input.display()))?;

        for summary in &summaries {
            println!("✓ {}: {}", summary.title, summary.output.display());
        }
        println!();
        self.print_results(&summaries);

        if self.csv {
            let path = output_dir.join("summary.csv");
            CsvExporter::export(&summaries, &path)
                .with_context(|| format!("Failed to export CSV to: {}", path.display()))?;
            println!("✓ CSV summary exported to: {}", path.display());
        }

        if self.json {
            let path = output_dir.join("summary.json");
            JsonExporter::export(&summaries, &path)
                .with_context(|| format!("Failed to export JSON to: {}", path.display()))?;
            println!("✓ JSON summary exported to: {}", path.display());
        }

        if self.excel {
            let path = output_dir.join("summary.xlsx");
            ExcelExporter::export(&summaries, &path)
                .with_context(|| format!("Failed to export Excel to: {}", path.display()))?;
            println!("✓ Excel summary exported to: {}", path.display());
        }

        Ok(())
    }

    /// Merge the config file (if any) with command-line overrides
    pub fn resolve_config(&self) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::from_file(path)
                .with_context(|| format!("Failed to load config from: {}", path.display()))?,
            None => ReportConfig::default(),
        };

        if let Some(input) = &self.input {
            config.input = input.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(total) = self.total_nodes {
            config.total_nodes = Some(total);
        }
        if let Some(dpi) = self.dpi {
            config.render.dpi = dpi;
        }
        if let Some(seed) = self.seed {
            config.bootstrap.seed = seed;
        }

        Ok(config)
    }

    fn print_results(&self, summaries: &[ChartSummary]) {
        for summary in summaries {
            println!("{}", summary.title);
            if summary.bars.is_empty() {
                println!("  (no measured values)");
                println!();
                continue;
            }

            println!(
                "  {:>6}  {:>7}  {:>10}  {:>21}",
                "nodes", "samples", "mean [s]", "95% CI [s]"
            );
            for bar in &summary.bars {
                println!(
                    "  {:>6}  {:>7}  {:>10.3}  [{:>9.3}, {:>9.3}]",
                    bar.nodes, bar.count, bar.mean, bar.ci_low, bar.ci_high
                );
            }
            println!();
        }
    }
}

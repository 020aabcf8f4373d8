//! CSV export functionality

use crate::error::Result;
use crate::report::ChartSummary;
use csv::Writer;
use std::fs::File;
use std::path::Path;

pub struct CsvExporter;

impl CsvExporter {
    /// Export one row per bar across all charts
    pub fn export(summaries: &[ChartSummary], path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut wtr = Writer::from_writer(file);

        wtr.write_record(["chart", "n", "count", "mean", "ci_low", "ci_high"])?;

        for summary in summaries {
            for bar in &summary.bars {
                wtr.write_record(&[
                    summary.column.clone(),
                    bar.nodes.to_string(),
                    bar.count.to_string(),
                    bar.mean.to_string(),
                    bar.ci_low.to_string(),
                    bar.ci_high.to_string(),
                ])?;
            }
        }

        wtr.flush()?;
        Ok(())
    }
}

//! JSON export functionality

use crate::error::{ReportError, Result};
use crate::report::ChartSummary;
use serde_json::json;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub struct JsonExporter;

impl JsonExporter {
    /// Export every chart with its bars
    pub fn export(summaries: &[ChartSummary], path: &Path) -> Result<()> {
        let charts: Vec<_> = summaries
            .iter()
            .map(|s| {
                json!({
                    "title": s.title,
                    "column": s.column,
                    "output": s.output.display().to_string(),
                    "bars": s.bars,
                })
            })
            .collect();

        let output = json!({ "charts": charts });

        let mut file = File::create(path)?;
        let text = serde_json::to_string_pretty(&output)
            .map_err(|e| ReportError::Export(e.to_string()))?;
        file.write_all(text.as_bytes())?;

        Ok(())
    }
}

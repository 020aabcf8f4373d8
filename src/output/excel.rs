//! Excel export functionality

use crate::error::{ReportError, Result};
use crate::report::ChartSummary;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;

/// Worksheet names are limited to 31 characters
const MAX_SHEET_NAME: usize = 31;

pub struct ExcelExporter;

impl ExcelExporter {
    /// Export every chart to its own worksheet
    pub fn export(summaries: &[ChartSummary], path: &Path) -> Result<()> {
        Self::write_workbook(summaries, path).map_err(|e| ReportError::Export(e.to_string()))
    }

    fn write_workbook(summaries: &[ChartSummary], path: &Path) -> std::result::Result<(), XlsxError> {
        let mut workbook = Workbook::new();

        if summaries.is_empty() {
            workbook.add_worksheet().set_name("Summary")?;
        }

        for (summary, name) in summaries.iter().zip(sheet_names(summaries)) {
            let sheet = workbook.add_worksheet();
            sheet.set_name(name)?;
            Self::write_chart(sheet, summary)?;
        }

        workbook.save(path)?;
        Ok(())
    }

    fn write_chart(sheet: &mut Worksheet, summary: &ChartSummary) -> std::result::Result<(), XlsxError> {
        let bold = Format::new().set_bold();
        let number_format = Format::new().set_num_format("0.000");

        sheet.write_with_format(0, 0, summary.title.as_str(), &bold)?;

        let headers = ["Mixnet Nodes", "Samples", "Mean [s]", "CI Low [s]", "CI High [s]"];
        for (col, header) in headers.iter().enumerate() {
            sheet.write_with_format(2, col as u16, *header, &bold)?;
        }

        let mut row = 3u32;
        for bar in &summary.bars {
            sheet.write(row, 0, bar.nodes as f64)?;
            sheet.write(row, 1, bar.count as f64)?;
            sheet.write_with_format(row, 2, bar.mean, &number_format)?;
            sheet.write_with_format(row, 3, bar.ci_low, &number_format)?;
            sheet.write_with_format(row, 4, bar.ci_high, &number_format)?;
            row += 1;
        }

        sheet.set_column_width(0, 16)?;
        sheet.set_column_width(2, 12)?;
        sheet.set_column_width(3, 12)?;
        sheet.set_column_width(4, 12)?;

        Ok(())
    }
}

/// One unique worksheet name per chart; repeated columns get a numeric suffix
fn sheet_names(summaries: &[ChartSummary]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(summaries.len());
    for summary in summaries {
        let base = sheet_name(&summary.column);
        let mut name = base.clone();
        let mut index = 2;
        while names.iter().any(|n| n.eq_ignore_ascii_case(&name)) {
            let suffix = format!(" ({})", index);
            let keep = MAX_SHEET_NAME.saturating_sub(suffix.len());
            name = format!("{}{}", base.chars().take(keep).collect::<String>(), suffix);
            index += 1;
        }
        names.push(name);
    }
    names
}

fn sheet_name(column: &str) -> String {
    let cleaned: String = column
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .take(MAX_SHEET_NAME)
        .collect();

    if cleaned.trim().is_empty() {
        "Chart".to_string()
    } else {
        cleaned
    }
}

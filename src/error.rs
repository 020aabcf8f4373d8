//! Error types for election-perf-report

use crate::config::ConfigError;
use thiserror::Error;

/// Report error type
#[derive(Error, Debug)]
pub enum ReportError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding or encoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the input header
    #[error("missing column: {column}")]
    MissingColumn {
        /// Name of the column that was looked up
        column: String,
    },

    /// A cell could not be parsed as a number
    #[error("invalid value {value:?} in column {column} at line {line}")]
    InvalidValue {
        /// 1-based line number in the source file
        line: u64,
        /// Column the cell belongs to
        column: String,
        /// Raw cell contents
        value: String,
    },

    /// Chart rendering error
    #[error("render error: {0}")]
    Render(String),

    /// Summary export error
    #[error("export error: {0}")]
    Export(String),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ReportError {
    pub(crate) fn missing_column(column: &str) -> Self {
        Self::MissingColumn {
            column: column.to_string(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ReportError>;

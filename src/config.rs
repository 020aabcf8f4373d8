//! Report configuration types

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default input file produced by the performance harness
pub const DEFAULT_INPUT: &str = "perf0.csv";

/// Raw durations are recorded in microseconds
pub const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Highest accepted resolution; 1200 dpi is already a 7680 x 5760 image
pub const MAX_DPI: u32 = 1200;

/// Report configuration
///
/// Every field has a default, so an empty config (or no config at all)
/// reads `perf0.csv` and writes `t1.png` / `t2.png` into the working
/// directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// CSV file with the timing samples
    pub input: PathBuf,

    /// Directory the charts and summaries are written to
    pub output_dir: PathBuf,

    /// Column holding the number of mixnet nodes
    pub node_column: String,

    /// Every metric value is divided by this right after loading
    pub divisor: f64,

    /// Total cluster size, appended to chart titles when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_nodes: Option<u32>,

    /// Image geometry
    pub render: RenderSettings,

    /// Error bar estimation
    pub bootstrap: BootstrapConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
            node_column: "n".to_string(),
            divisor: MICROS_PER_SECOND,
            total_nodes: None,
            render: RenderSettings::default(),
            bootstrap: BootstrapConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Load a config from a JSON file; missing fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))
    }

    /// Set the input file
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the total cluster size shown in chart titles
    pub fn with_total_nodes(mut self, total_nodes: u32) -> Self {
        self.total_nodes = Some(total_nodes);
        self
    }

    /// Set the resolution in dots per inch
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.render.dpi = dpi;
        self
    }

    /// Set the bootstrap seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.bootstrap.seed = seed;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.divisor.is_finite() || self.divisor <= 0.0 {
            return Err(ConfigError::InvalidDivisor(format!(
                "divisor must be a positive number, got {}",
                self.divisor
            )));
        }

        if self.node_column.trim().is_empty() {
            return Err(ConfigError::InvalidColumn(
                "node column name must not be empty".into(),
            ));
        }

        self.render.validate()?;
        self.bootstrap.validate()?;

        Ok(())
    }
}

/// Figure size and resolution
///
/// Sizes are given in inches and text in points; pixels are derived from
/// the DPI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Figure width in inches
    pub width_in: f64,
    /// Figure height in inches
    pub height_in: f64,
    /// Dots per inch
    pub dpi: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width_in: 6.4,
            height_in: 4.8,
            dpi: 300,
        }
    }
}

impl RenderSettings {
    /// Image size in pixels
    pub fn pixels(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi as f64).round() as u32,
            (self.height_in * self.dpi as f64).round() as u32,
        )
    }

    /// Convert a length in points (1/72 in) to pixels
    pub fn points(&self, pt: f64) -> u32 {
        (pt * self.dpi as f64 / 72.0).round().max(1.0) as u32
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.dpi == 0 || self.dpi > MAX_DPI {
            return Err(ConfigError::InvalidRender(format!(
                "dpi must be between 1 and {}, got {}",
                MAX_DPI, self.dpi
            )));
        }
        if !(self.width_in > 0.0 && self.height_in > 0.0) {
            return Err(ConfigError::InvalidRender(
                "figure size must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Bootstrap confidence interval settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Number of resamples per bar
    pub resamples: usize,
    /// Confidence level in (0, 1)
    pub confidence: f64,
    /// RNG seed; a fixed seed keeps reports reproducible
    pub seed: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            resamples: 1000,
            confidence: 0.95,
            seed: 0,
        }
    }
}

impl BootstrapConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.resamples == 0 {
            return Err(ConfigError::InvalidBootstrap(
                "resamples must be at least 1".into(),
            ));
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(ConfigError::InvalidBootstrap(format!(
                "confidence must be in (0, 1), got {}",
                self.confidence
            )));
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read or parsed
    #[error("Failed to load config: {0}")]
    Load(String),

    /// Invalid unit divisor
    #[error("Invalid divisor: {0}")]
    InvalidDivisor(String),

    /// Invalid column name
    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    /// Invalid figure geometry
    #[error("Invalid render settings: {0}")]
    InvalidRender(String),

    /// Invalid bootstrap parameters
    #[error("Invalid bootstrap settings: {0}")]
    InvalidBootstrap(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.input, PathBuf::from("perf0.csv"));
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.node_column, "n");
        assert_eq!(config.divisor, 1_000_000.0);
        assert!(config.total_nodes.is_none());
        assert_eq!(config.render.dpi, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder_pattern() {
        let config = ReportConfig::default()
            .with_input("runs.csv")
            .with_output_dir("plots")
            .with_total_nodes(10)
            .with_dpi(150)
            .with_seed(7);

        assert_eq!(config.input, PathBuf::from("runs.csv"));
        assert_eq!(config.output_dir, PathBuf::from("plots"));
        assert_eq!(config.total_nodes, Some(10));
        assert_eq!(config.render.dpi, 150);
        assert_eq!(config.bootstrap.seed, 7);
    }

    #[test]
    fn test_render_pixels() {
        let render = RenderSettings::default();
        assert_eq!(render.pixels(), (1920, 1440));
        assert_eq!(render.points(12.0), 50);
        assert_eq!(render.points(0.0), 1);
    }

    #[test]
    fn test_config_validation_bad_divisor() {
        let config = ReportConfig {
            divisor: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDivisor(_))
        ));

        let config = ReportConfig {
            divisor: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_dpi() {
        let config = ReportConfig::default().with_dpi(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRender(_))
        ));
    }

    #[test]
    fn test_config_validation_dpi_ceiling() {
        assert!(ReportConfig::default().with_dpi(MAX_DPI).validate().is_ok());
        assert!(matches!(
            ReportConfig::default().with_dpi(100_000).validate(),
            Err(ConfigError::InvalidRender(_))
        ));
    }

    #[test]
    fn test_config_validation_confidence() {
        let mut config = ReportConfig::default();
        config.bootstrap.confidence = 1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBootstrap(_))
        ));
    }

    #[test]
    fn test_config_from_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"input": "perf1.csv", "render": {{"dpi": 100}}}}"#).unwrap();

        let config = ReportConfig::from_file(file.path()).unwrap();
        assert_eq!(config.input, PathBuf::from("perf1.csv"));
        assert_eq!(config.render.dpi, 100);
        assert_eq!(config.render.width_in, 6.4);
        assert_eq!(config.bootstrap.resamples, 1000);
    }

    #[test]
    fn test_config_from_file_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            ReportConfig::from_file(file.path()),
            Err(ConfigError::Load(_))
        ));
    }
}

//! Pipeline tests for the ReportGenerator

use super::*;
use crate::error::ReportError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ============================================================================
// Recording renderer
// ============================================================================

#[derive(Default)]
struct RecordingRenderer {
    rendered: Vec<(String, Vec<BarStats>)>,
}

impl ChartRenderer for RecordingRenderer {
    fn render(&mut self, chart: &BarChart<'_>, path: &Path) -> Result<()> {
        fs::write(path, chart.title)?;
        self.rendered
            .push((chart.title.to_string(), chart.bars.to_vec()));
        Ok(())
    }
}

fn setup(csv: &str) -> (TempDir, ReportConfig) {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("perf0.csv");
    fs::write(&input, csv).unwrap();

    let config = ReportConfig::default()
        .with_input(input)
        .with_output_dir(dir.path());
    (dir, config)
}

fn generator(config: ReportConfig) -> ReportGenerator<RecordingRenderer> {
    ReportGenerator::with_renderer(config, RecordingRenderer::default())
}

fn heights(bars: &[BarStats]) -> Vec<(u32, f64)> {
    bars.iter().map(|b| (b.nodes, b.mean)).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_default_charts() {
    let charts = ChartSpec::election_charts(None);
    assert_eq!(charts.len(), 2);
    assert_eq!(charts[0].column, "t1");
    assert_eq!(charts[0].title, "Time to Initialize Election");
    assert_eq!(charts[0].file_name, "t1.png");
    assert_eq!(charts[1].column, "t2");
    assert_eq!(charts[1].title, "Time to Conclude Election (Mix and Tally)");
    assert_eq!(charts[1].file_name, "t2.png");
}

#[test]
fn test_titles_with_total_nodes() {
    let charts = ChartSpec::election_charts(Some(10));
    assert_eq!(charts[0].title, "Time to Initialize Election (10 total nodes)");
    assert_eq!(
        charts[1].title,
        "Time to Conclude Election (Mix and Tally) (10 total nodes)"
    );
}

#[test]
fn test_sentinel_rows_excluded() {
    let (dir, config) = setup("n,t1,t2\n2,2000000,5000000\n4,0,8000000\n");
    let mut report = generator(config);

    let summaries = report.run().unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(heights(&summaries[0].bars), vec![(2, 2.0)]);
    assert_eq!(heights(&summaries[1].bars), vec![(2, 5.0), (4, 8.0)]);

    assert_eq!(summaries[0].output, dir.path().join("t1.png"));
    assert!(dir.path().join("t1.png").exists());
    assert!(dir.path().join("t2.png").exists());

    let rendered = &report.renderer().rendered;
    assert_eq!(rendered.len(), 2);
    assert_eq!(rendered[0].0, "Time to Initialize Election");
    assert_eq!(rendered[0].1, summaries[0].bars);
}

#[test]
fn test_bar_set_matches_positive_node_counts() {
    let csv = "n,t1,t2\n\
               1,100,1\n\
               1,0,1\n\
               2,-5,1\n\
               3,1000000,1\n\
               3,3000000,1\n\
               5,0,1\n";
    let (_dir, config) = setup(csv);
    let summaries = generator(config).run().unwrap();

    let nodes: Vec<u32> = summaries[0].bars.iter().map(|b| b.nodes).collect();
    assert_eq!(nodes, vec![1, 3]);
    assert_eq!(summaries[0].bars[1].count, 2);
    assert_eq!(summaries[0].bars[1].mean, 2.0);

    let nodes: Vec<u32> = summaries[1].bars.iter().map(|b| b.nodes).collect();
    assert_eq!(nodes, vec![1, 2, 3, 5]);
}

#[test]
fn test_missing_t2_column_keeps_t1_chart() {
    let (dir, config) = setup("n,t1\n2,2000000\n");
    let mut report = generator(config);

    let err = report.run().unwrap_err();
    assert!(matches!(err, ReportError::MissingColumn { ref column } if column == "t2"));
    assert!(dir.path().join("t1.png").exists());
    assert!(!dir.path().join("t2.png").exists());
    assert_eq!(report.renderer().rendered.len(), 1);
}

#[test]
fn test_empty_input_renders_empty_charts() {
    let (dir, config) = setup("n,t1,t2\n");
    let mut report = generator(config);

    let summaries = report.run().unwrap();
    assert_eq!(summaries.len(), 2);
    assert!(summaries.iter().all(|s| s.bars.is_empty()));
    assert!(dir.path().join("t1.png").exists());
    assert!(dir.path().join("t2.png").exists());
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = ReportConfig::default()
        .with_input(dir.path().join("perf0.csv"))
        .with_output_dir(dir.path());
    let mut report = generator(config);

    let err = report.run().unwrap_err();
    assert!(matches!(err, ReportError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
    assert!(!dir.path().join("t1.png").exists());
    assert!(report.renderer().rendered.is_empty());
}

#[test]
fn test_non_numeric_value_aborts_before_rendering() {
    let (dir, config) = setup("n,t1,t2\n2,abc,5\n");
    let mut report = generator(config);

    assert!(matches!(
        report.run(),
        Err(ReportError::InvalidValue { .. })
    ));
    assert!(!dir.path().join("t1.png").exists());
}

#[test]
fn test_invalid_config_rejected() {
    let (_dir, mut config) = setup("n,t1,t2\n1,1,1\n");
    config.divisor = -1.0;
    assert!(matches!(
        generator(config).run(),
        Err(ReportError::Config(_))
    ));
}

#[test]
fn test_repeated_runs_are_identical() {
    let csv: String = std::iter::once("n,t1,t2\n".to_string())
        .chain((0..40).map(|i| format!("{},{},{}\n", 1 + i % 4, 1000 + i * 37, 9000 - i * 11)))
        .collect();
    let (_dir, config) = setup(&csv);

    let first = generator(config.clone()).run().unwrap();
    let second = generator(config).run().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_overwrites_existing_output() {
    let (dir, config) = setup("n,t1,t2\n1,1,1\n");
    let target = dir.path().join("t1.png");
    fs::write(&target, "stale").unwrap();

    generator(config).run().unwrap();
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "Time to Initialize Election"
    );
}

#[test]
fn test_custom_charts() {
    let (dir, config) = setup("n,t1,t2,t3\n1,1,1,3000000\n");
    let mut report = generator(config).with_charts(vec![ChartSpec::new("t3", "Phase 3", "t3.png")]);

    let summaries = report.run().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(heights(&summaries[0].bars), vec![(1, 3.0)]);
    assert!(dir.path().join("t3.png").exists());
    assert!(!dir.path().join("t1.png").exists());
}

#[test]
fn test_short_row_keeps_both_charts() {
    let (dir, config) = setup("n,t1,t2\n2,2000000\n4,3000000,8000000\n");
    let mut report = generator(config);

    let summaries = report.run().unwrap();
    assert_eq!(heights(&summaries[0].bars), vec![(2, 2.0), (4, 3.0)]);
    assert_eq!(heights(&summaries[1].bars), vec![(4, 8.0)]);
    assert!(dir.path().join("t1.png").exists());
    assert!(dir.path().join("t2.png").exists());
}

#[test]
fn test_png_report_on_empty_input() {
    let (dir, config) = setup("n,t1,t2\n");
    let summaries = ReportGenerator::new(config).run().unwrap();
    assert_eq!(summaries.len(), 2);

    for name in ["t1.png", "t2.png"] {
        let bytes = fs::read(dir.path().join(name)).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        assert_eq!(u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]), 1920);
        assert_eq!(u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]), 1440);
    }
}

//! Bar charts with error bars

use super::{BarChart, ChartRenderer, LINE_GREY, PASTEL};
use crate::config::RenderSettings;
use crate::error::{ReportError, Result};
use anyhow::Context;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

/// Fraction of each slot covered by its bar
const BAR_WIDTH: f64 = 0.8;

/// PNG bar chart renderer backed by plotters
///
/// One slot per bar, labelled with the node count. Bars use the pastel
/// palette, error bars and tick marks are drawn in [`LINE_GREY`].
#[derive(Debug, Clone)]
pub struct BarChartPlotter {
    settings: RenderSettings,
    palette: Vec<RGBColor>,
    line_color: RGBColor,
}

impl BarChartPlotter {
    /// Create a plotter with the pastel palette
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            palette: PASTEL.to_vec(),
            line_color: LINE_GREY,
        }
    }

    /// Replace the bar palette; an empty palette keeps the current one
    pub fn with_palette(mut self, palette: Vec<RGBColor>) -> Self {
        if !palette.is_empty() {
            self.palette = palette;
        }
        self
    }

    /// Plot a bar chart
    pub fn plot(&self, chart: &BarChart<'_>, path: &Path) -> anyhow::Result<()> {
        let s = &self.settings;
        let root = BitMapBackend::new(path, s.pixels()).into_drawing_area();
        root.fill(&WHITE)?;

        let slots = chart.bars.len().max(1) as f64;
        let y_max = y_upper_bound(chart);

        let mut ctx = ChartBuilder::on(&root)
            .caption(chart.title, ("sans-serif", s.points(12.0)))
            .margin(s.points(10.0))
            .x_label_area_size(s.points(36.0))
            .y_label_area_size(s.points(48.0))
            .build_cartesian_2d(-0.5f64..(slots - 0.5), 0f64..y_max)?;

        ctx.configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_labels(0)
            .y_labels(8)
            .x_desc(chart.x_desc)
            .y_desc(chart.y_desc)
            .label_style(("sans-serif", s.points(10.0)))
            .axis_desc_style(("sans-serif", s.points(10.0)))
            .axis_style(BLACK.stroke_width(s.points(0.8)))
            .y_label_formatter(&|y| format_tick(*y))
            .draw()?;

        // Bars
        ctx.draw_series(chart.bars.iter().enumerate().map(|(idx, bar)| {
            let x = idx as f64;
            let color = self.palette[idx % self.palette.len()];
            Rectangle::new(
                [(x - BAR_WIDTH / 2.0, 0.0), (x + BAR_WIDTH / 2.0, bar.mean)],
                color.filled(),
            )
        }))?;

        // Error bars
        let line_style = self.line_color.stroke_width(s.points(2.7));
        ctx.draw_series(
            chart
                .bars
                .iter()
                .enumerate()
                .filter(|(_, bar)| bar.ci_high > bar.ci_low)
                .map(|(idx, bar)| {
                    let x = idx as f64;
                    PathElement::new(vec![(x, bar.ci_low), (x, bar.ci_high)], line_style)
                }),
        )?;

        // Categorical x labels sit under each slot center
        let tick_len = s.points(3.5) as i32;
        let tick_style = self.line_color.stroke_width(s.points(0.8));
        let label_style = TextStyle::from(("sans-serif", s.points(10.0) as f64).into_font())
            .pos(Pos::new(HPos::Center, VPos::Top));

        for (idx, bar) in chart.bars.iter().enumerate() {
            let (px, py) = ctx.backend_coord(&(idx as f64, 0.0));
            root.draw(&PathElement::new(
                vec![(px, py), (px, py + tick_len)],
                tick_style,
            ))?;
            root.draw(&Text::new(
                bar.nodes.to_string(),
                (px, py + 2 * tick_len),
                label_style.clone(),
            ))?;
        }

        root.present()
            .with_context(|| format!("Failed to write image: {}", path.display()))?;
        Ok(())
    }
}

impl ChartRenderer for BarChartPlotter {
    fn render(&mut self, chart: &BarChart<'_>, path: &Path) -> Result<()> {
        self.plot(chart, path)
            .map_err(|e| ReportError::Render(format!("{}: {:#}", path.display(), e)))?;

        tracing::debug!(
            "Rendered '{}' with {} bars to {}",
            chart.title,
            chart.bars.len(),
            path.display()
        );
        Ok(())
    }
}

/// Top of the y axis: tallest bar or error bar plus a 5% margin
fn y_upper_bound(chart: &BarChart<'_>) -> f64 {
    let top = chart
        .bars
        .iter()
        .map(|bar| bar.mean.max(bar.ci_high))
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max);

    if top > 0.0 {
        top * 1.05
    } else {
        1.0
    }
}

fn format_tick(value: f64) -> String {
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

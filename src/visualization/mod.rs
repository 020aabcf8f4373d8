//! Visualization and plotting

pub mod bar;

pub use bar::BarChartPlotter;

use crate::error::Result;
use crate::stats::BarStats;
use plotters::style::RGBColor;
use std::path::Path;

/// Pastel palette, cycled across bars
pub const PASTEL: [RGBColor; 10] = [
    RGBColor(0xa1, 0xc9, 0xf4),
    RGBColor(0xff, 0xb4, 0x82),
    RGBColor(0x8d, 0xe5, 0xa1),
    RGBColor(0xff, 0x9f, 0x9b),
    RGBColor(0xd0, 0xbb, 0xff),
    RGBColor(0xde, 0xbb, 0x9b),
    RGBColor(0xfa, 0xb0, 0xe4),
    RGBColor(0xcf, 0xcf, 0xcf),
    RGBColor(0xff, 0xfe, 0xa3),
    RGBColor(0xb9, 0xf2, 0xf0),
];

/// Color of every line element drawn over the bars
pub const LINE_GREY: RGBColor = RGBColor(0x80, 0x80, 0x80);

/// Everything needed to draw one bar chart
#[derive(Debug, Clone, Copy)]
pub struct BarChart<'a> {
    /// Caption above the plot area
    pub title: &'a str,
    /// X axis description
    pub x_desc: &'a str,
    /// Y axis description
    pub y_desc: &'a str,
    /// Bars in drawing order, left to right
    pub bars: &'a [BarStats],
}

/// Writes a bar chart to an image file
pub trait ChartRenderer {
    /// Render `chart` to `path`, replacing any existing file
    fn render(&mut self, chart: &BarChart<'_>, path: &Path) -> Result<()>;
}

use serde::{Deserialize, Serialize};

use crate::core::{GridBounds, PlotMargins};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Visual parameters shared by all chart variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub margins: PlotMargins,
    pub background_color: Color,
    pub grid_line_color: Color,
    pub grid_line_width: f64,
    pub axis_color: Color,
    pub axis_line_width: f64,
    pub label_color: Color,
    pub label_font_size_px: f64,
    pub title_color: Color,
    pub title_font_size_px: f64,
    pub x_axis_title: String,
    pub y_axis_title: String,
    /// Gridline bounds for the time axis.
    pub time_grid: GridBounds,
    /// Segments on the value axis.
    pub value_grid_segments: usize,
    pub point_fill_color: Color,
    pub point_hover_fill_color: Color,
    pub point_stroke_color: Color,
    pub point_hover_stroke_color: Color,
    pub point_radius_px: f64,
    pub point_hover_radius_px: f64,
    pub point_stroke_width: f64,
    pub trend_line_color: Color,
    pub trend_fill_color: Color,
    pub trend_line_width: f64,
    /// Six ramp colors from "no citations" to "hottest month".
    pub heatmap_levels: [Color; 6],
    pub heatmap_cell_gap_px: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        let blue = Color::from_rgb8(59, 130, 246, 1.0);
        let orange = Color::from_rgb8(249, 115, 22, 1.0);
        let black = Color::rgb(0.0, 0.0, 0.0);
        Self {
            margins: PlotMargins::default(),
            background_color: Color::rgb(1.0, 1.0, 1.0),
            grid_line_color: black.with_alpha(0.1),
            grid_line_width: 1.0,
            axis_color: black.with_alpha(0.3),
            axis_line_width: 2.0,
            label_color: black.with_alpha(0.7),
            label_font_size_px: 12.0,
            title_color: black.with_alpha(0.8),
            title_font_size_px: 14.0,
            x_axis_title: "Publication Date".to_owned(),
            y_axis_title: "Citation Count".to_owned(),
            time_grid: GridBounds::default(),
            value_grid_segments: 5,
            point_fill_color: blue.with_alpha(0.7),
            point_hover_fill_color: blue.with_alpha(0.9),
            point_stroke_color: blue.with_alpha(0.9),
            point_hover_stroke_color: blue,
            point_radius_px: 6.0,
            point_hover_radius_px: 8.0,
            point_stroke_width: 2.0,
            trend_line_color: orange,
            trend_fill_color: orange.with_alpha(0.1),
            trend_line_width: 3.0,
            heatmap_levels: [
                Color::from_rgb8(235, 237, 240, 1.0),
                Color::from_rgb8(198, 219, 239, 1.0),
                Color::from_rgb8(158, 202, 225, 1.0),
                Color::from_rgb8(107, 174, 214, 1.0),
                Color::from_rgb8(49, 130, 189, 1.0),
                Color::from_rgb8(8, 81, 156, 1.0),
            ],
            heatmap_cell_gap_px: 2.0,
        }
    }
}

impl ChartStyle {
    /// Style for the per-year trend chart.
    #[must_use]
    pub fn trend() -> Self {
        let orange = Color::from_rgb8(249, 115, 22, 1.0);
        Self {
            x_axis_title: "Year".to_owned(),
            point_fill_color: orange,
            point_hover_fill_color: orange,
            point_stroke_color: Color::rgb(1.0, 1.0, 1.0),
            point_hover_stroke_color: Color::rgb(1.0, 1.0, 1.0),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.time_grid.validate()?;
        if self.value_grid_segments == 0 {
            return Err(ChartError::InvalidData(
                "value_grid_segments must be > 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("grid_line_width", self.grid_line_width),
            ("axis_line_width", self.axis_line_width),
            ("label_font_size_px", self.label_font_size_px),
            ("title_font_size_px", self.title_font_size_px),
            ("point_radius_px", self.point_radius_px),
            ("point_hover_radius_px", self.point_hover_radius_px),
            ("trend_line_width", self.trend_line_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "style `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.heatmap_cell_gap_px.is_finite() || self.heatmap_cell_gap_px < 0.0 {
            return Err(ChartError::InvalidData(
                "style `heatmap_cell_gap_px` must be finite and >= 0".to_owned(),
            ));
        }
        for color in [
            self.background_color,
            self.grid_line_color,
            self.axis_color,
            self.label_color,
            self.title_color,
            self.point_fill_color,
            self.point_hover_fill_color,
            self.point_stroke_color,
            self.point_hover_stroke_color,
            self.trend_line_color,
            self.trend_fill_color,
        ]
        .into_iter()
        .chain(self.heatmap_levels)
        {
            color.validate()?;
        }
        Ok(())
    }
}

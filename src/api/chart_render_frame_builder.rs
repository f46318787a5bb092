use std::f64::consts::FRAC_PI_2;

use smallvec::SmallVec;

use crate::core::primitives::{MILLIS_PER_YEAR, year_of_millis};
use crate::core::{
    DataPoint, Domain, PlotArea, PlotScales, ProjectedPoint, ViewWindow, Viewport,
    grid_line_count, grid_values, project_visible_points,
};
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, DrawCommand, LinePrimitive, PolygonPrimitive, RenderFrame, TextHAlign,
    TextPrimitive,
};

use super::{ChartStyle, ChartVariant};

const TIME_LABEL_OFFSET_PX: f64 = 20.0;
const VALUE_LABEL_OFFSET_PX: f64 = 10.0;
const X_TITLE_BOTTOM_PX: f64 = 15.0;
const Y_TITLE_LEFT_PX: f64 = 20.0;

/// Message drawn when there is nothing to plot.
pub const EMPTY_STATE_TEXT: &str = "No data for current filters";

/// How x values are interpreted when labelling the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    /// UTC milliseconds; gridlines spaced by years.
    Temporal,
    /// Plain year numbers.
    OrdinalYear,
}

impl From<ChartVariant> for AxisKind {
    fn from(variant: ChartVariant) -> Self {
        match variant {
            ChartVariant::Scatter => Self::Temporal,
            ChartVariant::Trend => Self::OrdinalYear,
        }
    }
}

/// Everything one scatter/trend draw pass depends on.
#[derive(Debug, Clone, Copy)]
pub struct ChartScene<'a> {
    pub viewport: Viewport,
    pub variant: ChartVariant,
    pub points: &'a [DataPoint],
    /// `None` while no dataset has established a viewport.
    pub window: Option<ViewWindow>,
    pub hovered: Option<usize>,
}

/// Builds the draw commands for one scatter or trend frame.
///
/// Pure: the same scene and style always produce the same frame. Points
/// outside `window.x` never reach the frame.
pub fn build_chart_frame(scene: ChartScene<'_>, style: &ChartStyle) -> ChartResult<RenderFrame> {
    let mut frame = RenderFrame::new(scene.viewport).with(DrawCommand::Clear(style.background_color));
    let area = PlotArea::new(scene.viewport, style.margins)?;

    let Some(window) = scene.window else {
        push_axes(&mut frame, area, style);
        push_titles(&mut frame, scene.viewport, area, style);
        frame.push(DrawCommand::Text(TextPrimitive::new(
            EMPTY_STATE_TEXT,
            area.left + area.width / 2.0,
            area.top + area.height / 2.0,
            style.title_font_size_px,
            style.label_color,
            TextHAlign::Center,
        )));
        return Ok(frame);
    };

    let scales = PlotScales::new(window, area)?;
    push_time_grid(&mut frame, window.x, scales, area, AxisKind::from(scene.variant), style);
    push_value_grid(&mut frame, window.y, scales, area, style);
    push_axes(&mut frame, area, style);
    push_titles(&mut frame, scene.viewport, area, style);

    let projected = project_visible_points(scene.points, window, area)?;
    if scene.variant == ChartVariant::Trend {
        push_trend_overlay(&mut frame, &projected, scene.points, area, style);
    }
    push_points(&mut frame, &projected, scene.hovered, style);
    Ok(frame)
}

fn push_time_grid(
    frame: &mut RenderFrame,
    domain: Domain,
    scales: PlotScales,
    area: PlotArea,
    kind: AxisKind,
    style: &ChartStyle,
) {
    let ticks: SmallVec<[(f64, Option<String>); 12]> = match kind {
        AxisKind::Temporal => {
            let count = grid_line_count(domain, MILLIS_PER_YEAR, style.time_grid);
            grid_values(domain, count)
                .into_iter()
                .map(|value| (value, year_of_millis(value).map(|year| year.to_string())))
                .collect()
        }
        AxisKind::OrdinalYear => ordinal_year_ticks(domain, style)
            .into_iter()
            .map(|year| (year, Some(format!("{year:.0}"))))
            .collect(),
    };

    for (value, label) in ticks {
        let x = scales.x.to_pixel(value);
        frame.push(DrawCommand::Line(LinePrimitive::new(
            x,
            area.top,
            x,
            area.bottom(),
            style.grid_line_width,
            style.grid_line_color,
        )));
        if let Some(label) = label {
            frame.push(DrawCommand::Text(TextPrimitive::new(
                label,
                x,
                area.bottom() + TIME_LABEL_OFFSET_PX,
                style.label_font_size_px,
                style.label_color,
                TextHAlign::Center,
            )));
        }
    }
}

/// Whole years inside `domain`, thinned to at most `time_grid.max_lines` + 1.
fn ordinal_year_ticks(domain: Domain, style: &ChartStyle) -> SmallVec<[f64; 12]> {
    let first = domain.min.ceil();
    let last = domain.max.floor();
    if last < first {
        return SmallVec::new();
    }
    let years = (last - first) as usize + 1;
    let step = years.div_ceil(style.time_grid.max_lines.max(1)).max(1);
    (0..years)
        .step_by(step)
        .map(|offset| first + offset as f64)
        .collect()
}

fn push_value_grid(
    frame: &mut RenderFrame,
    domain: Domain,
    scales: PlotScales,
    area: PlotArea,
    style: &ChartStyle,
) {
    for value in grid_values(domain, style.value_grid_segments) {
        let y = scales.y.to_pixel(value);
        frame.push(DrawCommand::Line(LinePrimitive::new(
            area.left,
            y,
            area.right(),
            y,
            style.grid_line_width,
            style.grid_line_color,
        )));
        frame.push(DrawCommand::Text(TextPrimitive::new(
            format!("{}", value.round() as i64),
            area.left - VALUE_LABEL_OFFSET_PX,
            y + style.label_font_size_px / 3.0,
            style.label_font_size_px,
            style.label_color,
            TextHAlign::Right,
        )));
    }
}

fn push_axes(frame: &mut RenderFrame, area: PlotArea, style: &ChartStyle) {
    frame.push(DrawCommand::Line(LinePrimitive::new(
        area.left,
        area.bottom(),
        area.right(),
        area.bottom(),
        style.axis_line_width,
        style.axis_color,
    )));
    frame.push(DrawCommand::Line(LinePrimitive::new(
        area.left,
        area.top,
        area.left,
        area.bottom(),
        style.axis_line_width,
        style.axis_color,
    )));
}

fn push_titles(frame: &mut RenderFrame, viewport: Viewport, area: PlotArea, style: &ChartStyle) {
    if !style.x_axis_title.is_empty() {
        frame.push(DrawCommand::Text(
            TextPrimitive::new(
                style.x_axis_title.clone(),
                area.left + area.width / 2.0,
                f64::from(viewport.height) - X_TITLE_BOTTOM_PX,
                style.title_font_size_px,
                style.title_color,
                TextHAlign::Center,
            )
            .bold(),
        ));
    }
    if !style.y_axis_title.is_empty() {
        frame.push(DrawCommand::Text(
            TextPrimitive::new(
                style.y_axis_title.clone(),
                Y_TITLE_LEFT_PX,
                area.top + area.height / 2.0,
                style.title_font_size_px,
                style.title_color,
                TextHAlign::Center,
            )
            .bold()
            .rotated(-FRAC_PI_2),
        ));
    }
}

/// Filled area under the trend polyline, then the polyline itself.
fn push_trend_overlay(
    frame: &mut RenderFrame,
    projected: &[ProjectedPoint],
    points: &[DataPoint],
    area: PlotArea,
    style: &ChartStyle,
) {
    let mut ordered: Vec<ProjectedPoint> = projected.to_vec();
    ordered.sort_by(|a, b| points[a.index].x.total_cmp(&points[b.index].x));
    let (Some(first), Some(last)) = (ordered.first().copied(), ordered.last().copied()) else {
        return;
    };
    if ordered.len() < 2 {
        return;
    }

    let mut outline: Vec<(f64, f64)> = ordered.iter().map(|p| (p.x, p.y)).collect();
    outline.push((last.x, area.bottom()));
    outline.push((first.x, area.bottom()));
    frame.push(DrawCommand::Polygon(PolygonPrimitive {
        points: outline,
        fill_color: style.trend_fill_color,
    }));

    for pair in ordered.windows(2) {
        frame.push(DrawCommand::Line(LinePrimitive::new(
            pair[0].x,
            pair[0].y,
            pair[1].x,
            pair[1].y,
            style.trend_line_width,
            style.trend_line_color,
        )));
    }
}

fn push_points(
    frame: &mut RenderFrame,
    projected: &[ProjectedPoint],
    hovered: Option<usize>,
    style: &ChartStyle,
) {
    let circle = |point: &ProjectedPoint, is_hovered: bool| {
        DrawCommand::Circle(if is_hovered {
            CirclePrimitive {
                cx: point.x,
                cy: point.y,
                radius: style.point_hover_radius_px,
                fill_color: style.point_hover_fill_color,
                stroke_width: style.point_stroke_width,
                stroke_color: style.point_hover_stroke_color,
            }
        } else {
            CirclePrimitive {
                cx: point.x,
                cy: point.y,
                radius: style.point_radius_px,
                fill_color: style.point_fill_color,
                stroke_width: style.point_stroke_width,
                stroke_color: style.point_stroke_color,
            }
        })
    };

    // Hovered marker last so it sits on top.
    let mut highlighted = None;
    for point in projected {
        if Some(point.index) == hovered {
            highlighted = Some(point);
            continue;
        }
        frame.push(circle(point, false));
    }
    if let Some(point) = highlighted {
        frame.push(circle(point, true));
    }
}

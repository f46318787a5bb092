//! Year-by-month citation heatmap.
//!
//! Rows are years in ascending order, columns are calendar months. Cell
//! color comes from one of six intensity levels relative to the busiest
//! month in the dataset.

use indexmap::IndexMap;
use tracing::debug;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::interaction::NavigationTarget;
use crate::records::HeatmapRecord;
use crate::render::{DrawCommand, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive};

use super::ChartStyle;

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const YEAR_LABEL_WIDTH_PX: f64 = 50.0;
const MONTH_HEADER_HEIGHT_PX: f64 = 20.0;
const LEGEND_HEIGHT_PX: f64 = 30.0;
const LEGEND_CELL_PX: f64 = 12.0;
const CELL_VALUE_MIN_HEIGHT_PX: f64 = 14.0;
const HOVER_BORDER_PX: f64 = 2.0;

/// Bucket index (`0..=5`) for a normalized intensity.
///
/// Zero is its own bucket; the rest split `(0, 1]` into fifths.
#[must_use]
pub fn intensity_level(intensity: f64) -> usize {
    if intensity <= 0.0 {
        0
    } else if intensity <= 0.2 {
        1
    } else if intensity <= 0.4 {
        2
    } else if intensity <= 0.6 {
        3
    } else if intensity <= 0.8 {
        4
    } else {
        5
    }
}

/// Aggregated totals for one year/month slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapCell {
    pub year: i64,
    /// Calendar month, `1..=12`.
    pub month: u32,
    pub citations: f64,
    /// Source rows folded into this cell.
    pub records: usize,
    /// `citations / max_citations`, in `[0, 1]`.
    pub intensity: f64,
    pub level: usize,
}

impl HeatmapCell {
    #[must_use]
    pub fn is_clickable(self) -> bool {
        self.citations > 0.0
    }

    #[must_use]
    pub fn navigation_target(self) -> Option<NavigationTarget> {
        self.is_clickable()
            .then(|| NavigationTarget::month(self.year, i64::from(self.month)))
    }

    /// Hover text, e.g. `Mar 2021: 42 citations`.
    #[must_use]
    pub fn title(self) -> String {
        let name = MONTH_NAMES[(self.month as usize).saturating_sub(1).min(11)];
        format!("{name} {}: {} citations", self.year, self.citations)
    }
}

/// Dense year x month matrix built from `heatmapData` rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeatmapGrid {
    years: Vec<i64>,
    cells: Vec<HeatmapCell>,
    max_citations: f64,
}

impl HeatmapGrid {
    /// Sums rows sharing a year and month. Months outside `1..=12` are
    /// rejected.
    pub fn from_records(records: &[HeatmapRecord]) -> ChartResult<Self> {
        let mut totals: IndexMap<(i64, u32), (f64, usize)> = IndexMap::new();
        for record in records {
            let month = u32::try_from(record.month)
                .ok()
                .filter(|month| (1..=12).contains(month))
                .ok_or_else(|| {
                    ChartError::InvalidData(format!(
                        "heatmap month {} out of range for year {}",
                        record.month, record.year
                    ))
                })?;
            if !record.citations.is_finite() || record.citations < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "heatmap citations for {}-{month:02} must be finite and >= 0",
                    record.year
                )));
            }
            let entry = totals.entry((record.year, month)).or_insert((0.0, 0));
            entry.0 += record.citations;
            entry.1 += 1;
        }

        let mut years: Vec<i64> = totals.keys().map(|(year, _)| *year).collect();
        years.sort_unstable();
        years.dedup();
        let max_citations = totals
            .values()
            .map(|(citations, _)| *citations)
            .fold(1.0, f64::max);

        let cells = years
            .iter()
            .flat_map(|year| (1..=12).map(move |month| (*year, month)))
            .map(|(year, month)| {
                let (citations, records) = totals.get(&(year, month)).copied().unwrap_or((0.0, 0));
                let intensity = citations / max_citations;
                HeatmapCell {
                    year,
                    month,
                    citations,
                    records,
                    intensity,
                    level: intensity_level(intensity),
                }
            })
            .collect();

        Ok(Self {
            years,
            cells,
            max_citations,
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    #[must_use]
    pub fn years(&self) -> &[i64] {
        &self.years
    }

    /// Row-major cells, twelve per year.
    #[must_use]
    pub fn cells(&self) -> &[HeatmapCell] {
        &self.cells
    }

    /// Normalization denominator; never below one.
    #[must_use]
    pub fn max_citations(&self) -> f64 {
        self.max_citations
    }

    #[must_use]
    pub fn cell(&self, year: i64, month: u32) -> Option<HeatmapCell> {
        let row = self.years.binary_search(&year).ok()?;
        let column = usize::try_from(month).ok()?.checked_sub(1)?;
        if column >= 12 {
            return None;
        }
        self.cells.get(row * 12 + column).copied()
    }
}

/// Pixel geometry of the heatmap matrix inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapLayout {
    pub left: f64,
    pub top: f64,
    pub cell_width: f64,
    pub cell_height: f64,
    pub gap: f64,
    pub rows: usize,
}

impl HeatmapLayout {
    pub fn new(viewport: Viewport, rows: usize, style: &ChartStyle) -> ChartResult<Self> {
        let viewport = viewport.ensure_valid()?;
        let left = YEAR_LABEL_WIDTH_PX;
        let top = style.margins.top + MONTH_HEADER_HEIGHT_PX;
        let width = f64::from(viewport.width) - left - style.margins.right;
        let height = f64::from(viewport.height) - top - LEGEND_HEIGHT_PX;
        let cell_width = width / 12.0;
        let cell_height = height / rows.max(1) as f64;
        if !cell_width.is_finite()
            || !cell_height.is_finite()
            || cell_width <= style.heatmap_cell_gap_px
            || cell_height <= style.heatmap_cell_gap_px
        {
            return Err(ChartError::InvalidData(format!(
                "viewport {}x{} too small for {rows} heatmap rows",
                viewport.width, viewport.height
            )));
        }
        Ok(Self {
            left,
            top,
            cell_width,
            cell_height,
            gap: style.heatmap_cell_gap_px,
            rows,
        })
    }

    /// Cell rectangle, inset by half the gap on every side.
    #[must_use]
    pub fn cell_rect(self, row: usize, column: usize) -> (f64, f64, f64, f64) {
        let half_gap = self.gap / 2.0;
        (
            self.left + column as f64 * self.cell_width + half_gap,
            self.top + row as f64 * self.cell_height + half_gap,
            self.cell_width - self.gap,
            self.cell_height - self.gap,
        )
    }

    /// `(row, column)` under a pointer, gaps excluded.
    #[must_use]
    pub fn locate(self, x: f64, y: f64) -> Option<(usize, usize)> {
        if x < self.left || y < self.top {
            return None;
        }
        let column = ((x - self.left) / self.cell_width).floor() as usize;
        let row = ((y - self.top) / self.cell_height).floor() as usize;
        if column >= 12 || row >= self.rows {
            return None;
        }
        let (cell_x, cell_y, width, height) = self.cell_rect(row, column);
        let inside = x >= cell_x && x <= cell_x + width && y >= cell_y && y <= cell_y + height;
        inside.then_some((row, column))
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.rows as f64 * self.cell_height
    }
}

/// Draw commands for the heatmap: month header, year labels, cells, legend.
///
/// A clickable `hovered` cell gets an outline.
pub fn build_heatmap_frame(
    grid: &HeatmapGrid,
    viewport: Viewport,
    hovered: Option<HeatmapCell>,
    style: &ChartStyle,
) -> ChartResult<RenderFrame> {
    let mut frame = RenderFrame::new(viewport).with(DrawCommand::Clear(style.background_color));
    if grid.is_empty() {
        frame.push(DrawCommand::Text(TextPrimitive::new(
            "No citation heatmap data available for the selected filters.",
            f64::from(viewport.width) / 2.0,
            f64::from(viewport.height) / 2.0,
            style.title_font_size_px,
            style.label_color,
            TextHAlign::Center,
        )));
        return Ok(frame);
    }

    let layout = HeatmapLayout::new(viewport, grid.years().len(), style)?;
    for (column, name) in MONTH_NAMES.iter().enumerate() {
        let (x, _, width, _) = layout.cell_rect(0, column);
        frame.push(DrawCommand::Text(TextPrimitive::new(
            *name,
            x + width / 2.0,
            layout.top - style.label_font_size_px / 2.0,
            style.label_font_size_px,
            style.label_color,
            TextHAlign::Center,
        )));
    }

    for (row, year) in grid.years().iter().enumerate() {
        let (_, y, _, height) = layout.cell_rect(row, 0);
        frame.push(DrawCommand::Text(TextPrimitive::new(
            year.to_string(),
            layout.left - style.label_font_size_px / 2.0,
            y + height / 2.0 + style.label_font_size_px / 3.0,
            style.label_font_size_px,
            style.label_color,
            TextHAlign::Right,
        )));
        for column in 0..12 {
            let cell = grid.cells()[row * 12 + column];
            let (x, y, width, height) = layout.cell_rect(row, column);
            let mut rect = RectPrimitive::new(x, y, width, height, style.heatmap_levels[cell.level]);
            let is_hovered = hovered
                .is_some_and(|other| other.year == cell.year && other.month == cell.month);
            if is_hovered && cell.is_clickable() {
                rect = rect.with_border(HOVER_BORDER_PX, style.title_color);
            }
            frame.push(DrawCommand::Rect(rect));
            if cell.is_clickable() && height >= CELL_VALUE_MIN_HEIGHT_PX {
                frame.push(DrawCommand::Text(TextPrimitive::new(
                    format!("{}", cell.citations),
                    x + width / 2.0,
                    y + height / 2.0 + style.label_font_size_px / 3.0,
                    style.label_font_size_px * 0.8,
                    style.title_color,
                    TextHAlign::Center,
                )));
            }
        }
    }

    push_legend(&mut frame, layout, style);
    Ok(frame)
}

fn push_legend(frame: &mut RenderFrame, layout: HeatmapLayout, style: &ChartStyle) {
    let y = layout.bottom() + (LEGEND_HEIGHT_PX - LEGEND_CELL_PX) / 2.0;
    let text_y = y + LEGEND_CELL_PX - 2.0;
    let mut x = layout.left;
    frame.push(DrawCommand::Text(TextPrimitive::new(
        "Less",
        x,
        text_y,
        style.label_font_size_px,
        style.label_color,
        TextHAlign::Left,
    )));
    x += style.label_font_size_px * 3.0;
    for color in style.heatmap_levels {
        frame.push(DrawCommand::Rect(RectPrimitive::new(
            x,
            y,
            LEGEND_CELL_PX,
            LEGEND_CELL_PX,
            color,
        )));
        x += LEGEND_CELL_PX + style.heatmap_cell_gap_px;
    }
    frame.push(DrawCommand::Text(TextPrimitive::new(
        "More",
        x + style.heatmap_cell_gap_px,
        text_y,
        style.label_font_size_px,
        style.label_color,
        TextHAlign::Left,
    )));
}

/// Heatmap panel facade: owns the grid, layout inputs and renderer.
pub struct CitationHeatmap<R: Renderer> {
    renderer: R,
    viewport: Viewport,
    style: ChartStyle,
    grid: HeatmapGrid,
    hovered: Option<HeatmapCell>,
}

impl<R: Renderer> CitationHeatmap<R> {
    pub fn new(renderer: R, viewport: Viewport, style: ChartStyle) -> ChartResult<Self> {
        style.validate()?;
        Ok(Self {
            renderer,
            viewport: viewport.ensure_valid()?,
            style,
            grid: HeatmapGrid::default(),
            hovered: None,
        })
    }

    pub fn set_records(&mut self, records: &[HeatmapRecord]) -> ChartResult<()> {
        self.grid = HeatmapGrid::from_records(records)?;
        self.hovered = None;
        debug!(
            years = self.grid.years().len(),
            max_citations = self.grid.max_citations(),
            "heatmap data replaced"
        );
        Ok(())
    }

    #[must_use]
    pub fn grid(&self) -> &HeatmapGrid {
        &self.grid
    }

    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        self.viewport = viewport.ensure_valid()?;
        Ok(())
    }

    /// Cell under the pointer, if any.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<Option<HeatmapCell>> {
        self.hovered = self.cell_at(x, y)?;
        Ok(self.hovered)
    }

    /// Month search for a clicked cell with citations.
    pub fn click(&self, x: f64, y: f64) -> ChartResult<Option<NavigationTarget>> {
        Ok(self.cell_at(x, y)?.and_then(HeatmapCell::navigation_target))
    }

    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        build_heatmap_frame(&self.grid, self.viewport, self.hovered, &self.style)
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn cell_at(&self, x: f64, y: f64) -> ChartResult<Option<HeatmapCell>> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ChartError::InvalidData(
                "pointer position must be finite".to_owned(),
            ));
        }
        if self.grid.is_empty() {
            return Ok(None);
        }
        let layout = HeatmapLayout::new(self.viewport, self.grid.years().len(), &self.style)?;
        Ok(layout
            .locate(x, y)
            .and_then(|(row, column)| self.grid.cells().get(row * 12 + column).copied()))
    }
}

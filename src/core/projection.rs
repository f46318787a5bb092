#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::scale::{LinearScale, PixelRange};
use crate::core::types::{DataPoint, ViewWindow, Viewport};
use crate::error::{ChartError, ChartResult};

/// Space reserved around the plot for axes and titles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotMargins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for PlotMargins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 60.0,
            left: 80.0,
        }
    }
}

/// Pixel rectangle in which data is plotted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn new(viewport: Viewport, margins: PlotMargins) -> ChartResult<Self> {
        let viewport = viewport.ensure_valid()?;
        let width = f64::from(viewport.width) - margins.left - margins.right;
        let height = f64::from(viewport.height) - margins.top - margins.bottom;
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "margins leave no plot area inside {}x{}",
                viewport.width, viewport.height
            )));
        }
        Ok(Self {
            left: margins.left,
            top: margins.top,
            width,
            height,
        })
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn x_range(self) -> PixelRange {
        PixelRange::new(self.left, self.right())
    }

    /// Vertical range, inverted so larger values sit higher.
    #[must_use]
    pub fn y_range(self) -> PixelRange {
        PixelRange::new(self.bottom(), self.top)
    }
}

/// Pair of scales mapping a window into a plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotScales {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl PlotScales {
    pub fn new(window: ViewWindow, area: PlotArea) -> ChartResult<Self> {
        Ok(Self {
            x: LinearScale::new(window.x, area.x_range())?,
            y: LinearScale::new(window.y, area.y_range())?,
        })
    }
}

/// A point inside the current window, in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    /// Index into the source point slice.
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

/// Projects points whose `x` lies inside `window.x`; others are skipped
/// entirely. Output preserves input order.
pub fn project_visible_points(
    points: &[DataPoint],
    window: ViewWindow,
    area: PlotArea,
) -> ChartResult<Vec<ProjectedPoint>> {
    let scales = PlotScales::new(window, area)?;
    let project = |(index, point): (usize, &DataPoint)| {
        window.x.contains(point.x).then(|| ProjectedPoint {
            index,
            x: scales.x.to_pixel(point.x),
            y: scales.y.to_pixel(point.y),
        })
    };

    #[cfg(feature = "parallel-projection")]
    {
        Ok(points.par_iter().enumerate().filter_map(project).collect())
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        Ok(points.iter().enumerate().filter_map(project).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{PlotArea, PlotMargins, project_visible_points};
    use crate::core::{DataPoint, Domain, ViewWindow, Viewport};

    #[test]
    fn plot_area_respects_margins() {
        let area = PlotArea::new(Viewport::new(800, 400), PlotMargins::default()).expect("area");
        assert_eq!(area.width, 700.0);
        assert_eq!(area.height, 320.0);
        assert_eq!(area.bottom(), 340.0);
    }

    #[test]
    fn margins_larger_than_viewport_are_rejected() {
        assert!(PlotArea::new(Viewport::new(90, 400), PlotMargins::default()).is_err());
    }

    #[test]
    fn projection_skips_points_outside_window() {
        let area = PlotArea::new(Viewport::new(800, 400), PlotMargins::default()).expect("area");
        let window = ViewWindow::new(Domain::new(0.0, 10.0), Domain::new(0.0, 100.0));
        let points = vec![
            DataPoint::new(-1.0, 5.0, "before", "a"),
            DataPoint::new(5.0, 50.0, "inside", "b"),
            DataPoint::new(11.0, 5.0, "after", "c"),
        ];
        let projected = project_visible_points(&points, window, area).expect("projection");
        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].index, 1);
        assert_eq!(projected[0].x, 430.0);
        assert_eq!(projected[0].y, 180.0);
    }
}

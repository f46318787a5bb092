use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, PlotArea, ViewWindow, Viewport, project_visible_points};
use crate::error::{ChartError, ChartResult};

/// Pointer hit radius and tooltip geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitTestConfig {
    /// Points farther than this (exclusive) are never hit.
    pub threshold_px: f64,
    pub tooltip_width_px: f64,
    pub tooltip_height_px: f64,
    /// Gap between cursor and tooltip box.
    pub cursor_offset_px: f64,
    /// Minimum room above the cursor before the tooltip flips below.
    pub edge_margin_px: f64,
}

impl Default for HitTestConfig {
    fn default() -> Self {
        Self {
            threshold_px: 15.0,
            tooltip_width_px: 350.0,
            tooltip_height_px: 120.0,
            cursor_offset_px: 15.0,
            edge_margin_px: 20.0,
        }
    }
}

impl HitTestConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.threshold_px.is_finite() || self.threshold_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "hit threshold must be finite and > 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("tooltip_width_px", self.tooltip_width_px),
            ("tooltip_height_px", self.tooltip_height_px),
            ("cursor_offset_px", self.cursor_offset_px),
            ("edge_margin_px", self.edge_margin_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Index of the visible point closest to `pointer`, if within `threshold_px`.
///
/// Ties keep the earliest point in input order.
pub fn find_nearest(
    pointer: (f64, f64),
    points: &[DataPoint],
    window: ViewWindow,
    area: PlotArea,
    threshold_px: f64,
) -> ChartResult<Option<usize>> {
    if !pointer.0.is_finite() || !pointer.1.is_finite() {
        return Err(ChartError::InvalidData(
            "pointer position must be finite".to_owned(),
        ));
    }
    let nearest = project_visible_points(points, window, area)?
        .into_iter()
        .map(|projected| {
            let distance = (projected.x - pointer.0).hypot(projected.y - pointer.1);
            (OrderedFloat(distance), projected.index)
        })
        .filter(|(distance, _)| distance.0 < threshold_px)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, index)| index);
    Ok(nearest)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalAnchor {
    /// Box sits to the right of the cursor.
    RightOfCursor,
    /// Box sits to the left of the cursor.
    LeftOfCursor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalAnchor {
    Above,
    Below,
}

/// Tooltip box in container pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipPlacement {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub horizontal: HorizontalAnchor,
    pub vertical: VerticalAnchor,
}

/// Places the tooltip on the side of the cursor facing the container center,
/// above the cursor unless that would clip the top edge.
#[must_use]
pub fn place_tooltip(
    cursor: (f64, f64),
    container: Viewport,
    config: HitTestConfig,
) -> TooltipPlacement {
    let (x, y) = cursor;
    let width = config.tooltip_width_px;
    let height = config.tooltip_height_px;
    let offset = config.cursor_offset_px;

    let (left, horizontal) = if x > f64::from(container.width) / 2.0 {
        (x - offset - width, HorizontalAnchor::LeftOfCursor)
    } else {
        (x + offset, HorizontalAnchor::RightOfCursor)
    };
    let (top, vertical) = if y < height + config.edge_margin_px {
        (y + offset, VerticalAnchor::Below)
    } else {
        (y - offset - height, VerticalAnchor::Above)
    };

    TooltipPlacement {
        left,
        top,
        width,
        height,
        horizontal,
        vertical,
    }
}

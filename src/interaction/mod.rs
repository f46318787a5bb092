mod hit_test;

pub use hit_test::{
    HitTestConfig, HorizontalAnchor, TooltipPlacement, VerticalAnchor, find_nearest, place_tooltip,
};

use serde::{Deserialize, Serialize};

/// Detail view requested by a click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationTarget {
    /// Paper detail page keyed by the paper id.
    PaperDetail { id: String },
    /// Explore search filtered to one month, formatted `YYYY-MM`.
    MonthSearch { month: String },
}

impl NavigationTarget {
    #[must_use]
    pub fn month(year: i64, month: i64) -> Self {
        Self::MonthSearch {
            month: format!("{year}-{month:02}"),
        }
    }

    /// Application route for the target.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::PaperDetail { id } => format!("/paper/{id}"),
            Self::MonthSearch { month } => format!("/explore?month={month}"),
        }
    }
}

/// Tooltip currently shown for a hovered point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    pub point_index: usize,
    pub placement: TooltipPlacement,
}

/// Pointer and hover state of one chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    cursor: Option<(f64, f64)>,
    hovered: Option<usize>,
    tooltip: Option<TooltipState>,
}

impl InteractionState {
    #[must_use]
    pub fn cursor(self) -> Option<(f64, f64)> {
        self.cursor
    }

    #[must_use]
    pub fn hovered(self) -> Option<usize> {
        self.hovered
    }

    #[must_use]
    pub fn tooltip(self) -> Option<TooltipState> {
        self.tooltip
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.cursor = Some((x, y));
    }

    /// Records the hover hit; returns `true` when the highlighted point changed.
    pub fn set_hover(&mut self, hit: Option<usize>, tooltip: Option<TooltipPlacement>) -> bool {
        let changed = self.hovered != hit;
        self.hovered = hit;
        self.tooltip = match (hit, tooltip) {
            (Some(point_index), Some(placement)) => Some(TooltipState {
                point_index,
                placement,
            }),
            _ => None,
        };
        changed
    }

    /// Clears hover; returns `true` when a point was highlighted.
    pub fn on_pointer_leave(&mut self) -> bool {
        self.cursor = None;
        self.set_hover(None, None)
    }
}

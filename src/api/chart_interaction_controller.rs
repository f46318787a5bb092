use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::core::primitives::unix_millis_to_datetime;
use crate::core::{DataPoint, PanState, ViewportState};
use crate::error::ChartResult;
use crate::interaction::{NavigationTarget, TooltipState, find_nearest, place_tooltip};
use crate::render::Renderer;

use super::{ChartVariant, CitationChart};

impl<R: Renderer> CitationChart<R> {
    pub fn zoom_in(&mut self) -> ChartResult<()> {
        self.ensure_active()?;
        let next = self.viewport_state.zoom_in(self.config.zoom);
        self.apply_viewport("zoom_in", next);
        Ok(())
    }

    pub fn zoom_out(&mut self) -> ChartResult<()> {
        self.ensure_active()?;
        let next = self.viewport_state.zoom_out(self.config.zoom);
        self.apply_viewport("zoom_out", next);
        Ok(())
    }

    pub fn reset_zoom(&mut self) -> ChartResult<()> {
        self.ensure_active()?;
        let next = self.viewport_state.reset();
        self.apply_viewport("reset_zoom", next);
        Ok(())
    }

    /// Slides the zoomed window to `percent` (0..=100) of its travel.
    pub fn pan(&mut self, percent: f64) -> ChartResult<()> {
        self.ensure_active()?;
        let next = self.viewport_state.pan(percent)?;
        self.apply_viewport("pan", next);
        Ok(())
    }

    /// Pan slider position; 50 while not zoomed.
    #[must_use]
    pub fn pan_position(&self) -> f64 {
        self.viewport_state.pan_position()
    }

    #[must_use]
    pub fn pan_state(&self) -> Option<PanState> {
        self.viewport_state.viewport().and_then(|viewport| viewport.pan_state())
    }

    /// Visible dates while a scatter chart is zoomed.
    #[must_use]
    pub fn visible_date_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        if self.config.variant != ChartVariant::Scatter {
            return None;
        }
        let viewport = self.viewport_state.viewport().filter(|v| v.is_zoomed())?;
        let current = viewport.current().x;
        Some((
            unix_millis_to_datetime(current.min)?,
            unix_millis_to_datetime(current.max)?,
        ))
    }

    /// Updates hover from a pointer position in surface pixels.
    ///
    /// Returns the tooltip to show, if a point is within the hit radius.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<Option<TooltipState>> {
        self.ensure_active()?;
        self.interaction.on_pointer_move(x, y);
        let hit = self.hit_at(x, y)?;
        let placement =
            hit.map(|_| place_tooltip((x, y), self.config.viewport, self.config.hit_test));
        if self.interaction.set_hover(hit, placement) {
            trace!(?hit, "hover changed");
            self.dirty = true;
        }
        Ok(self.interaction.tooltip())
    }

    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        self.ensure_active()?;
        if self.interaction.on_pointer_leave() {
            self.dirty = true;
        }
        Ok(())
    }

    /// Point under the pointer, as last reported by `pointer_move`.
    #[must_use]
    pub fn hovered_point(&self) -> Option<&DataPoint> {
        self.interaction
            .hovered()
            .and_then(|index| self.points.get(index))
    }

    /// Detail view for a clicked scatter point; empty space yields `None`.
    pub fn click(&self, x: f64, y: f64) -> ChartResult<Option<NavigationTarget>> {
        self.ensure_active()?;
        if self.config.variant != ChartVariant::Scatter {
            return Ok(None);
        }
        let target = self.hit_at(x, y)?.map(|index| NavigationTarget::PaperDetail {
            id: self.points[index].id.clone(),
        });
        if let Some(target) = &target {
            debug!(path = %target.path(), "point clicked");
        }
        Ok(target)
    }

    fn hit_at(&self, x: f64, y: f64) -> ChartResult<Option<usize>> {
        let Some(window) = self.viewport_state.current() else {
            return Ok(None);
        };
        find_nearest(
            (x, y),
            &self.points,
            window,
            self.plot_area()?,
            self.config.hit_test.threshold_px,
        )
    }

    fn apply_viewport(&mut self, operation: &'static str, next: ViewportState) {
        if next == self.viewport_state {
            return;
        }
        self.viewport_state = next;
        self.dirty = true;
        debug!(
            operation,
            phase = ?next.phase(),
            pan_position = next.pan_position(),
            "viewport changed"
        );
    }
}

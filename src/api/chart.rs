use tracing::{debug, trace};

use crate::core::{DataPoint, PlotArea, ViewportPhase, ViewportState, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::InteractionState;
use crate::records::{CitationDataResponse, PaperRecord, TrendRecord};
use crate::render::{RenderFrame, Renderer};

use super::chart_render_frame_builder::{ChartScene, build_chart_frame};
use super::{ChartConfig, ChartVariant, DataChangeReconciler, ReconcileDecision};

/// Scatter/trend chart instance.
///
/// Owns every piece of per-chart state: data, viewport machine, reconciler,
/// hover state and the renderer. Created by [`CitationChart::init`] and torn
/// down by [`CitationChart::dispose`]; any call after disposal returns
/// [`ChartError::Disposed`].
pub struct CitationChart<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartConfig,
    pub(super) points: Vec<DataPoint>,
    pub(super) viewport_state: ViewportState,
    pub(super) reconciler: DataChangeReconciler,
    pub(super) interaction: InteractionState,
    pub(super) last_decision: Option<ReconcileDecision>,
    pub(super) dirty: bool,
    pub(super) disposed: bool,
}

impl<R: Renderer> CitationChart<R> {
    pub fn init(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let reconciler = DataChangeReconciler::new(config.reconciler, config.padding)?;
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            variant = ?config.variant,
            "chart initialized"
        );
        Ok(Self {
            renderer,
            config,
            points: Vec::new(),
            viewport_state: ViewportState::Unset,
            reconciler,
            interaction: InteractionState::default(),
            last_decision: None,
            dirty: true,
            disposed: false,
        })
    }

    /// Drops data and viewport state; later calls fail with `Disposed`.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.points.clear();
        self.viewport_state = ViewportState::Unset;
        self.reconciler.forget();
        self.interaction = InteractionState::default();
        self.last_decision = None;
        self.dirty = false;
        self.disposed = true;
        debug!("chart disposed");
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    #[must_use]
    pub fn viewport_state(&self) -> ViewportState {
        self.viewport_state
    }

    #[must_use]
    pub fn phase(&self) -> ViewportPhase {
        self.viewport_state.phase()
    }

    #[must_use]
    pub fn last_decision(&self) -> Option<ReconcileDecision> {
        self.last_decision
    }

    #[must_use]
    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    /// Replaces the dataset and lets the reconciler decide the viewport.
    pub fn set_points(&mut self, points: Vec<DataPoint>) -> ChartResult<ReconcileDecision> {
        self.ensure_active()?;
        let (state, decision) = self.reconciler.reconcile(&points, self.viewport_state)?;
        debug!(count = points.len(), ?decision, "dataset replaced");
        self.points = points;
        self.viewport_state = state;
        self.last_decision = Some(decision);
        // Indices from the previous dataset are meaningless now.
        self.interaction.set_hover(None, None);
        self.dirty = true;
        Ok(decision)
    }

    /// Scatter rows: publication date against total citations.
    pub fn set_paper_records(&mut self, records: &[PaperRecord]) -> ChartResult<ReconcileDecision> {
        let points = records
            .iter()
            .map(PaperRecord::to_data_point)
            .collect::<ChartResult<Vec<_>>>()?;
        self.set_points(points)
    }

    /// Trend rows: year against yearly citation totals.
    pub fn set_trend_records(&mut self, records: &[TrendRecord]) -> ChartResult<ReconcileDecision> {
        self.set_points(records.iter().map(TrendRecord::to_data_point).collect())
    }

    /// Feeds the dataset matching this chart's variant from a loaded response.
    pub fn set_response(&mut self, response: &CitationDataResponse) -> ChartResult<ReconcileDecision> {
        let points = match self.config.variant {
            ChartVariant::Scatter => response.impact_points()?,
            ChartVariant::Trend => response.trend_points(),
        };
        self.set_points(points)
    }

    /// Updates the surface size; forces a full redraw.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        self.ensure_active()?;
        let viewport = viewport.ensure_valid()?;
        PlotArea::new(viewport, self.config.style.margins)?;
        if viewport != self.config.viewport {
            trace!(width = viewport.width, height = viewport.height, "chart resized");
        }
        self.config.viewport = viewport;
        self.interaction.on_pointer_leave();
        self.dirty = true;
        Ok(())
    }

    pub fn plot_area(&self) -> ChartResult<PlotArea> {
        PlotArea::new(self.config.viewport, self.config.style.margins)
    }

    /// `true` when state changed since the last successful render.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        self.ensure_active()?;
        let scene = ChartScene {
            viewport: self.config.viewport,
            variant: self.config.variant,
            points: &self.points,
            window: self.viewport_state.current(),
            hovered: self.interaction.hovered(),
        };
        build_chart_frame(scene, &self.config.style)
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)?;
        self.dirty = false;
        trace!(commands = frame.commands.len(), "chart rendered");
        Ok(())
    }

    /// Renders only when something changed; returns whether a frame was drawn.
    pub fn render_if_needed(&mut self) -> ChartResult<bool> {
        self.ensure_active()?;
        if !self.dirty {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub(super) fn ensure_active(&self) -> ChartResult<()> {
        if self.disposed {
            return Err(ChartError::Disposed);
        }
        Ok(())
    }
}

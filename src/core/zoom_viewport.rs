use serde::{Deserialize, Serialize};

use crate::core::types::{Domain, ViewWindow};
use crate::error::{ChartError, ChartResult};

/// Relative tolerance under which `current` is considered equal to `original`.
const SAME_WINDOW_EPSILON_RATIO: f64 = 1e-9;

/// Pan slider position reported while not zoomed.
pub const CENTER_PAN_PERCENT: f64 = 50.0;

const DEFAULT_MIN_WIDTH_RATIO: f64 = 1e-4;

/// Width multipliers applied by zoom buttons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Multiplier for `zoom_in`, in `(0, 1)`.
    pub zoom_in_factor: f64,
    /// Multiplier for `zoom_out`, `> 1`.
    pub zoom_out_factor: f64,
    /// Narrowest visible x window as a fraction of the original width.
    pub min_width_ratio: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self::symmetric(0.7)
    }
}

impl ZoomConfig {
    /// Zoom-out uses the exact inverse so in/out sequences cancel.
    #[must_use]
    pub fn symmetric(zoom_in_factor: f64) -> Self {
        Self {
            zoom_in_factor,
            zoom_out_factor: 1.0 / zoom_in_factor,
            min_width_ratio: DEFAULT_MIN_WIDTH_RATIO,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.zoom_in_factor.is_finite()
            || self.zoom_in_factor <= 0.0
            || self.zoom_in_factor >= 1.0
        {
            return Err(ChartError::InvalidData(
                "zoom_in_factor must be finite and in (0, 1)".to_owned(),
            ));
        }
        if !self.zoom_out_factor.is_finite() || self.zoom_out_factor <= 1.0 {
            return Err(ChartError::InvalidData(
                "zoom_out_factor must be finite and > 1".to_owned(),
            ));
        }
        if !self.min_width_ratio.is_finite()
            || self.min_width_ratio < 0.0
            || self.min_width_ratio >= 1.0
        {
            return Err(ChartError::InvalidData(
                "min_width_ratio must be finite and in [0, 1)".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Observable phase of the viewport machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewportPhase {
    Unset,
    Established,
    Zoomed,
}

/// Pan slider state; only exists while `current.x` is a strict sub-range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanState {
    pub position_percent: f64,
}

/// Full-data window plus the user's visible window.
///
/// Invariant: `original` contains `current` on both axes. Only the x axis
/// zooms; `current.y` always mirrors `original.y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomViewport {
    original: ViewWindow,
    current: ViewWindow,
}

impl ZoomViewport {
    pub fn established(original: ViewWindow) -> ChartResult<Self> {
        for domain in [original.x, original.y] {
            Domain::try_new(domain.min, domain.max)?;
            if domain.span() <= 0.0 {
                return Err(ChartError::InvalidData(
                    "viewport domains must have positive width".to_owned(),
                ));
            }
        }
        Ok(Self {
            original,
            current: original,
        })
    }

    #[must_use]
    pub fn original(self) -> ViewWindow {
        self.original
    }

    #[must_use]
    pub fn current(self) -> ViewWindow {
        self.current
    }

    #[must_use]
    pub fn is_zoomed(self) -> bool {
        let epsilon = self.original.x.span() * SAME_WINDOW_EPSILON_RATIO;
        !self.current.x.approx_eq(self.original.x, epsilon)
    }

    #[must_use]
    pub fn phase(self) -> ViewportPhase {
        if self.is_zoomed() {
            ViewportPhase::Zoomed
        } else {
            ViewportPhase::Established
        }
    }

    /// Shrinks the visible x window around its center, never below
    /// `min_width_ratio` of the original width.
    #[must_use]
    pub fn zoomed_in(self, config: ZoomConfig) -> Self {
        let floor = self.original.x.span() * config.min_width_ratio;
        if self.current.x.span() <= floor * (1.0 + SAME_WINDOW_EPSILON_RATIO) {
            return self;
        }
        self.with_width((self.current.x.span() * config.zoom_in_factor).max(floor))
    }

    /// Grows the visible x window, shifting it to stay inside `original`.
    #[must_use]
    pub fn zoomed_out(self, config: ZoomConfig) -> Self {
        self.rescaled(config.zoom_out_factor)
    }

    #[must_use]
    pub fn reset(self) -> Self {
        Self {
            original: self.original,
            current: self.original,
        }
    }

    /// Positions the visible window at `percent` of the slide range.
    ///
    /// No-op unless zoomed. `percent` is clamped to `[0, 100]`.
    pub fn panned(self, percent: f64) -> ChartResult<Self> {
        if !percent.is_finite() {
            return Err(ChartError::InvalidData(
                "pan percent must be finite".to_owned(),
            ));
        }
        let width = self.current.x.span();
        let slide = self.original.x.span() - width;
        if !self.is_zoomed() || slide <= 0.0 {
            return Ok(self);
        }
        let min = self.original.x.min + slide * percent.clamp(0.0, 100.0) / 100.0;
        let x = Domain::new(min, min + width).shifted_within(self.original.x);
        Ok(self.with_current_x(x))
    }

    #[must_use]
    pub fn pan_state(self) -> Option<PanState> {
        if !self.is_zoomed() {
            return None;
        }
        let slide = self.original.x.span() - self.current.x.span();
        if slide <= 0.0 {
            return None;
        }
        let offset = self.current.x.min - self.original.x.min;
        Some(PanState {
            position_percent: (offset / slide * 100.0).clamp(0.0, 100.0),
        })
    }

    /// Replaces the value axis on both windows, leaving the x zoom alone.
    #[must_use]
    pub fn with_value_domain(self, y: Domain) -> Self {
        Self {
            original: ViewWindow::new(self.original.x, y),
            current: ViewWindow::new(self.current.x, y),
        }
    }

    fn rescaled(self, factor: f64) -> Self {
        self.with_width(self.current.x.span() * factor)
    }

    fn with_width(self, width: f64) -> Self {
        let width = width.min(self.original.x.span());
        let center = self.current.x.center();
        let x = Domain::new(center - width * 0.5, center + width * 0.5)
            .shifted_within(self.original.x);
        self.with_current_x(x)
    }

    fn with_current_x(self, x: Domain) -> Self {
        let epsilon = self.original.x.span() * SAME_WINDOW_EPSILON_RATIO;
        let x = if x.approx_eq(self.original.x, epsilon) {
            self.original.x
        } else {
            x
        };
        Self {
            original: self.original,
            current: ViewWindow::new(x, self.original.y),
        }
    }
}

/// Viewport lifecycle: nothing until the first dataset establishes a window.
///
/// Every transition replaces the whole value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ViewportState {
    #[default]
    Unset,
    Ready(ZoomViewport),
}

impl ViewportState {
    #[must_use]
    pub fn phase(self) -> ViewportPhase {
        match self {
            Self::Unset => ViewportPhase::Unset,
            Self::Ready(viewport) => viewport.phase(),
        }
    }

    #[must_use]
    pub fn viewport(self) -> Option<ZoomViewport> {
        match self {
            Self::Unset => None,
            Self::Ready(viewport) => Some(viewport),
        }
    }

    #[must_use]
    pub fn current(self) -> Option<ViewWindow> {
        self.viewport().map(ZoomViewport::current)
    }

    #[must_use]
    pub fn original(self) -> Option<ViewWindow> {
        self.viewport().map(ZoomViewport::original)
    }

    #[must_use]
    pub fn zoom_in(self, config: ZoomConfig) -> Self {
        self.map(|viewport| viewport.zoomed_in(config))
    }

    #[must_use]
    pub fn zoom_out(self, config: ZoomConfig) -> Self {
        self.map(|viewport| viewport.zoomed_out(config))
    }

    #[must_use]
    pub fn reset(self) -> Self {
        self.map(ZoomViewport::reset)
    }

    pub fn pan(self, percent: f64) -> ChartResult<Self> {
        match self {
            Self::Unset => Ok(self),
            Self::Ready(viewport) => Ok(Self::Ready(viewport.panned(percent)?)),
        }
    }

    /// Slider position: the pan offset while zoomed, centered otherwise.
    #[must_use]
    pub fn pan_position(self) -> f64 {
        self.viewport()
            .and_then(ZoomViewport::pan_state)
            .map_or(CENTER_PAN_PERCENT, |pan| pan.position_percent)
    }

    fn map(self, op: impl FnOnce(ZoomViewport) -> ZoomViewport) -> Self {
        match self {
            Self::Unset => self,
            Self::Ready(viewport) => Self::Ready(op(viewport)),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::core::{PaddingPolicy, Viewport, ZoomConfig};
use crate::error::{ChartError, ChartResult};
use crate::interaction::HitTestConfig;

use super::{ChartStyle, ReconcilerConfig};

/// Data shape plotted on the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartVariant {
    /// Papers by publication date (UTC milliseconds) against citations.
    Scatter,
    /// Citation totals per year (ordinal year axis) drawn as a filled line.
    Trend,
}

/// Chart bootstrap configuration.
///
/// Serializable so hosts can persist chart setup. Missing fields fall back to
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
    #[serde(default = "default_variant")]
    pub variant: ChartVariant,
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub padding: PaddingPolicy,
    #[serde(default)]
    pub reconciler: ReconcilerConfig,
    #[serde(default)]
    pub hit_test: HitTestConfig,
    #[serde(default)]
    pub style: ChartStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::new(default_viewport())
    }
}

impl ChartConfig {
    /// Scatter chart config with default tuning.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            variant: default_variant(),
            zoom: ZoomConfig::default(),
            padding: PaddingPolicy::default(),
            reconciler: ReconcilerConfig::default(),
            hit_test: HitTestConfig::default(),
            style: ChartStyle::default(),
        }
    }

    /// Trend chart config: ordinal years and trend styling.
    #[must_use]
    pub fn trend(viewport: Viewport) -> Self {
        Self {
            variant: ChartVariant::Trend,
            padding: PaddingPolicy::ordinal_years(),
            style: ChartStyle::trend(),
            ..Self::new(viewport)
        }
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: ZoomConfig) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_reconciler(mut self, reconciler: ReconcilerConfig) -> Self {
        self.reconciler = reconciler;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.viewport.ensure_valid()?;
        self.zoom.validate()?;
        self.padding.validate()?;
        self.reconciler.validate()?;
        self.hit_test.validate()?;
        self.style.validate()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart config: {e}")))
    }
}

fn default_viewport() -> Viewport {
    Viewport::new(800, 400)
}

fn default_variant() -> ChartVariant {
    ChartVariant::Scatter
}

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    DataPoint, DataSignature, Domain, PaddingPolicy, ViewWindow, ViewportState, ZoomViewport,
    raw_extent,
};
use crate::error::{ChartError, ChartResult};

/// Tuning for the reset-or-preserve heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// A new dataset resets the view when its raw x overlap with the previous
    /// dataset drops below `1 - overlap_threshold`.
    pub overlap_threshold: f64,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            overlap_threshold: 0.3,
        }
    }
}

impl ReconcilerConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.overlap_threshold.is_finite() || !(0.0..=1.0).contains(&self.overlap_threshold) {
            return Err(ChartError::InvalidData(
                "overlap_threshold must be finite and in [0, 1]".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Smallest overlap ratio that still preserves the user's zoom.
    #[must_use]
    pub fn min_overlap(self) -> f64 {
        1.0 - self.overlap_threshold
    }
}

/// What the reconciler did with an incoming dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReconcileDecision {
    /// No prior dataset: window fitted from scratch.
    FirstLoad,
    /// Data moved too far; window refitted and zoom dropped.
    Reset,
    /// Zoom kept, value axis refreshed.
    Preserve,
    /// Same signature as the last dataset.
    Unchanged,
    /// Empty dataset; viewport returned to `Unset`.
    Cleared,
}

/// Decides, per incoming dataset, whether to keep the user's zoom window.
#[derive(Debug, Clone, PartialEq)]
pub struct DataChangeReconciler {
    config: ReconcilerConfig,
    padding: PaddingPolicy,
    last_signature: Option<DataSignature>,
    last_raw_x: Option<Domain>,
}

impl DataChangeReconciler {
    pub fn new(config: ReconcilerConfig, padding: PaddingPolicy) -> ChartResult<Self> {
        Ok(Self {
            config: config.validate()?,
            padding: padding.validate()?,
            last_signature: None,
            last_raw_x: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> ReconcilerConfig {
        self.config
    }

    #[must_use]
    pub fn last_signature(&self) -> Option<DataSignature> {
        self.last_signature
    }

    /// Raw x domain the overlap test compares against.
    #[must_use]
    pub fn last_raw_x(&self) -> Option<Domain> {
        self.last_raw_x
    }

    /// Forgets the previous dataset so the next one counts as a first load.
    pub fn forget(&mut self) {
        self.last_signature = None;
        self.last_raw_x = None;
    }

    /// Computes the viewport for `points` given the one currently shown.
    ///
    /// The returned state replaces `state` as a whole.
    pub fn reconcile(
        &mut self,
        points: &[DataPoint],
        state: ViewportState,
    ) -> ChartResult<(ViewportState, ReconcileDecision)> {
        let Some((raw_x, max_y)) = raw_extent(points)? else {
            debug!("empty dataset clears viewport");
            self.forget();
            return Ok((ViewportState::Unset, ReconcileDecision::Cleared));
        };
        let signature = DataSignature::of(points);

        let (previous_raw_x, viewport) = match (self.last_raw_x, state.viewport()) {
            (Some(previous), Some(viewport)) => (previous, viewport),
            _ => {
                let fitted = self.fit(raw_x, max_y)?;
                debug!(count = points.len(), "first dataset establishes viewport");
                self.remember(signature, raw_x);
                return Ok((ViewportState::Ready(fitted), ReconcileDecision::FirstLoad));
            }
        };

        if signature.is_some() && signature == self.last_signature {
            return Ok((state, ReconcileDecision::Unchanged));
        }

        let overlap = previous_raw_x.overlap_ratio(raw_x);
        if overlap < self.config.min_overlap() {
            let fitted = self.fit(raw_x, max_y)?;
            debug!(
                overlap,
                min_overlap = self.config.min_overlap(),
                "dataset moved; resetting viewport"
            );
            self.remember(signature, raw_x);
            return Ok((ViewportState::Ready(fitted), ReconcileDecision::Reset));
        }

        debug!(overlap, "dataset overlaps; preserving zoom");
        self.last_signature = signature;
        let preserved = viewport.with_value_domain(self.padding.pad_values(max_y));
        Ok((ViewportState::Ready(preserved), ReconcileDecision::Preserve))
    }

    fn fit(&self, raw_x: Domain, max_y: f64) -> ChartResult<ZoomViewport> {
        ZoomViewport::established(ViewWindow::new(
            self.padding.pad_time(raw_x),
            self.padding.pad_values(max_y),
        ))
    }

    fn remember(&mut self, signature: Option<DataSignature>, raw_x: Domain) {
        self.last_signature = signature;
        self.last_raw_x = Some(raw_x);
    }
}

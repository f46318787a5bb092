use serde::{Deserialize, Serialize};

use crate::core::primitives::MILLIS_PER_YEAR;
use crate::core::types::{DataPoint, Domain, ViewWindow};
use crate::error::{ChartError, ChartResult};

/// Visual margins applied when fitting the full-data window.
///
/// Padding keeps boundary points off the axis edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddingPolicy {
    /// Fraction of the raw time span added on each side.
    pub time_padding_ratio: f64,
    /// Lower bound for the per-side time padding, in axis units.
    pub min_time_padding: f64,
    /// Fraction of the value maximum added on top.
    pub value_padding_ratio: f64,
    /// Lower bound for the padded value maximum.
    pub min_value_max: f64,
}

impl Default for PaddingPolicy {
    fn default() -> Self {
        Self {
            time_padding_ratio: 0.05,
            min_time_padding: MILLIS_PER_YEAR,
            value_padding_ratio: 0.1,
            min_value_max: 10.0,
        }
    }
}

impl PaddingPolicy {
    /// Policy for ordinal year axes (trend rows), padding by half a year.
    #[must_use]
    pub fn ordinal_years() -> Self {
        Self {
            min_time_padding: 0.5,
            ..Self::default()
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("time_padding_ratio", self.time_padding_ratio),
            ("value_padding_ratio", self.value_padding_ratio),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "padding `{name}` must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("min_time_padding", self.min_time_padding),
            ("min_value_max", self.min_value_max),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "padding `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }

    /// Expands a raw time domain by `max(span * ratio, min_time_padding)` per side.
    #[must_use]
    pub fn pad_time(self, raw: Domain) -> Domain {
        let padding = (raw.span() * self.time_padding_ratio).max(self.min_time_padding);
        Domain::new(raw.min - padding, raw.max + padding)
    }

    /// Value axis anchored at zero with a padded maximum.
    #[must_use]
    pub fn pad_values(self, raw_max: f64) -> Domain {
        let max = (raw_max * (1.0 + self.value_padding_ratio)).max(self.min_value_max);
        Domain::new(0.0, max)
    }
}

/// Raw (unpadded) x domain and maximum y value of a point set.
pub fn raw_extent(points: &[DataPoint]) -> ChartResult<Option<(Domain, f64)>> {
    for point in points {
        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "point `{}` has non-finite coordinates",
                point.id
            )));
        }
    }
    let Some(x) = Domain::enclosing(points.iter().map(|point| point.x)) else {
        return Ok(None);
    };
    let max_y = points.iter().map(|point| point.y).fold(f64::MIN, f64::max);
    Ok(Some((x, max_y)))
}

/// Fits the padded full-data window for a point set.
pub fn fit_window(points: &[DataPoint], policy: PaddingPolicy) -> ChartResult<Option<ViewWindow>> {
    let policy = policy.validate()?;
    Ok(raw_extent(points)?
        .map(|(raw_x, max_y)| ViewWindow::new(policy.pad_time(raw_x), policy.pad_values(max_y))))
}

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::types::Domain;
use crate::error::{ChartError, ChartResult};

/// Bounds for the time-axis gridline heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    pub min_lines: usize,
    pub max_lines: usize,
}

impl Default for GridBounds {
    fn default() -> Self {
        Self {
            min_lines: 3,
            max_lines: 10,
        }
    }
}

impl GridBounds {
    pub fn validate(self) -> ChartResult<Self> {
        if self.min_lines == 0 || self.min_lines > self.max_lines {
            return Err(ChartError::InvalidData(
                "grid bounds must satisfy 0 < min_lines <= max_lines".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Gridline count: one per natural unit of span, clamped to `bounds`.
#[must_use]
pub fn grid_line_count(domain: Domain, unit: f64, bounds: GridBounds) -> usize {
    if !unit.is_finite() || unit <= 0.0 || !domain.span().is_finite() {
        return bounds.min_lines;
    }
    let units = (domain.span() / unit).floor();
    if units <= 0.0 {
        return bounds.min_lines;
    }
    (units as usize).clamp(bounds.min_lines, bounds.max_lines)
}

/// Evenly spaced values dividing `domain` into `segments` parts, endpoints included.
#[must_use]
pub fn grid_values(domain: Domain, segments: usize) -> SmallVec<[f64; 12]> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| domain.min + domain.span() * (i as f64) / (segments as f64))
        .collect()
}

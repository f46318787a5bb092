use serde::{Deserialize, Serialize};

use crate::core::types::DataPoint;

/// Cheap change-detection key for a point set: cardinality plus extremes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataSignature {
    pub count: usize,
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl DataSignature {
    /// Computes the signature; `None` for an empty point set.
    #[must_use]
    pub fn of(points: &[DataPoint]) -> Option<Self> {
        let first = points.first()?;
        let seed = Self {
            count: points.len(),
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        Some(points.iter().skip(1).fold(seed, |acc, point| Self {
            count: acc.count,
            min_x: acc.min_x.min(point.x),
            max_x: acc.max_x.max(point.x),
            min_y: acc.min_y.min(point.y),
            max_y: acc.max_y.max(point.y),
        }))
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pixel size of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn ensure_valid(self) -> ChartResult<Self> {
        if !self.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// One plotted sample.
///
/// `x` is a UTC timestamp in milliseconds (or an ordinal for trend rows),
/// `y` the citation count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub id: String,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64, label: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            x,
            y,
            label: label.into(),
            id: id.into(),
        }
    }
}

/// Closed value range on one axis, in data units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Builds a domain, rejecting non-finite or inverted bounds.
    pub fn try_new(min: f64, max: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::InvalidData(
                "domain bounds must be finite".to_owned(),
            ));
        }
        if min > max {
            return Err(ChartError::InvalidData(format!(
                "domain min {min} must not exceed max {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// Smallest domain covering every value; `None` for empty input.
    pub fn enclosing(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut bounds: Option<(f64, f64)> = None;
        for value in values {
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(value), max.max(value)),
                None => (value, value),
            });
        }
        bounds.map(|(min, max)| Self { min, max })
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn center(self) -> f64 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    #[must_use]
    pub fn contains_domain(self, other: Domain) -> bool {
        other.min >= self.min && other.max <= self.max
    }

    /// Widens a degenerate domain symmetrically to `min_span`.
    #[must_use]
    pub fn with_min_span(self, min_span: f64) -> Self {
        if self.span() >= min_span {
            return self;
        }
        let half = min_span * 0.5;
        let center = self.center();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Fraction of mutual coverage relative to the narrower of both domains.
    ///
    /// Zero-width domains count as fully overlapping when they lie inside the
    /// other domain and as disjoint otherwise.
    #[must_use]
    pub fn overlap_ratio(self, other: Domain) -> f64 {
        let overlap = (self.max.min(other.max) - self.min.max(other.min)).max(0.0);
        let narrower = self.span().min(other.span());
        if narrower <= 0.0 {
            let (thin, wide) = if self.span() <= other.span() {
                (self, other)
            } else {
                (other, self)
            };
            return if wide.contains_domain(thin) { 1.0 } else { 0.0 };
        }
        (overlap / narrower).min(1.0)
    }

    /// Moves `self` (keeping its width) so it fits inside `bounds`.
    ///
    /// A domain wider than `bounds` collapses to `bounds`.
    #[must_use]
    pub fn shifted_within(self, bounds: Domain) -> Self {
        let span = self.span();
        if span >= bounds.span() {
            return bounds;
        }
        if self.min < bounds.min {
            return Self::new(bounds.min, bounds.min + span);
        }
        if self.max > bounds.max {
            return Self::new(bounds.max - span, bounds.max);
        }
        self
    }

    #[must_use]
    pub fn approx_eq(self, other: Domain, epsilon: f64) -> bool {
        (self.min - other.min).abs() <= epsilon && (self.max - other.max).abs() <= epsilon
    }
}

/// Pair of x/y domains rendered together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewWindow {
    pub x: Domain,
    pub y: Domain,
}

impl ViewWindow {
    #[must_use]
    pub const fn new(x: Domain, y: Domain) -> Self {
        Self { x, y }
    }
}

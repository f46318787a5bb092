use crate::core::types::Domain;
use crate::error::{ChartError, ChartResult};

/// Target pixel interval for one axis.
///
/// `start > end` is allowed and expresses an inverted axis (the value axis,
/// where larger counts sit closer to the top edge).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRange {
    pub start: f64,
    pub end: f64,
}

impl PixelRange {
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        (self.end - self.start).abs()
    }
}

/// Linear mapping between one data domain and one pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: Domain,
    range: PixelRange,
}

impl LinearScale {
    /// Builds a scale; the domain must be finite with positive width.
    ///
    /// Callers widen single-point domains first (see `Domain::with_min_span`).
    pub fn new(domain: Domain, range: PixelRange) -> ChartResult<Self> {
        if !domain.min.is_finite() || !domain.max.is_finite() || domain.span() <= 0.0 {
            return Err(ChartError::InvalidData(
                "scale domain must be finite with positive width".to_owned(),
            ));
        }
        if !range.start.is_finite() || !range.end.is_finite() || range.start == range.end {
            return Err(ChartError::InvalidData(
                "pixel range must be finite and non-empty".to_owned(),
            ));
        }
        Ok(Self { domain, range })
    }

    #[must_use]
    pub fn domain(self) -> Domain {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> PixelRange {
        self.range
    }

    #[must_use]
    pub fn to_pixel(self, value: f64) -> f64 {
        to_pixel(value, self.domain, self.range)
    }

    #[must_use]
    pub fn to_value(self, pixel: f64) -> f64 {
        to_value(pixel, self.domain, self.range)
    }
}

/// Maps a data value to a pixel coordinate.
///
/// Total for any finite input as long as `domain` has positive width.
#[must_use]
pub fn to_pixel(value: f64, domain: Domain, range: PixelRange) -> f64 {
    let normalized = (value - domain.min) / domain.span();
    range.start + normalized * (range.end - range.start)
}

/// Inverse of [`to_pixel`].
#[must_use]
pub fn to_value(pixel: f64, domain: Domain, range: PixelRange) -> f64 {
    let normalized = (pixel - range.start) / (range.end - range.start);
    domain.min + normalized * domain.span()
}

#[cfg(test)]
mod tests {
    use super::{LinearScale, PixelRange};
    use crate::core::Domain;

    #[test]
    fn inverted_range_maps_max_to_top() {
        let scale =
            LinearScale::new(Domain::new(0.0, 100.0), PixelRange::new(340.0, 20.0)).expect("scale");
        assert_eq!(scale.to_pixel(100.0), 20.0);
        assert_eq!(scale.to_pixel(0.0), 340.0);
        assert_eq!(scale.to_value(180.0), 50.0);
    }

    #[test]
    fn zero_width_domain_is_rejected() {
        let result = LinearScale::new(Domain::new(5.0, 5.0), PixelRange::new(0.0, 10.0));
        assert!(result.is_err());
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One pixel axis: where the domain start lands and how far the domain end is from it.
///
/// `length` is signed; a negative length describes an upward-growing axis
/// (domain start at the bottom edge).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelSpan {
    origin: f64,
    length: f64,
}

impl PixelSpan {
    pub fn new(origin: f64, length: f64) -> ChartResult<Self> {
        if !origin.is_finite() || !length.is_finite() || length == 0.0 {
            return Err(ChartError::InvalidGeometry {
                width: length,
                height: 0.0,
            });
        }
        Ok(Self { origin, length })
    }

    #[must_use]
    pub fn origin(self) -> f64 {
        self.origin
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.length
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64, span: PixelSpan) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(span.origin + normalized * span.length)
    }

    pub fn pixel_to_domain(self, pixel: f64, span: PixelSpan) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = (pixel - span.origin) / span.length;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}

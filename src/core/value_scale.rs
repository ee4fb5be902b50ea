use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, PixelSpan, PlotRectangle};
use crate::error::{ChartError, ChartResult};

/// Vertical magnitude axis mapped to an inverted Y pixel axis.
///
/// `y_min` sits on the plot bottom edge and `y_max` on the top edge, so
/// `value = y_min + ((bottom - pixel_y) / height) * (y_max - y_min)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueAxis {
    scale: LinearScale,
    span: PixelSpan,
}

impl ValueAxis {
    pub fn new(y_min: f64, y_max: f64, plot: PlotRectangle) -> ChartResult<Self> {
        if plot.height <= 0.0 {
            return Err(ChartError::InvalidGeometry {
                width: plot.width,
                height: plot.height,
            });
        }

        Ok(Self {
            scale: LinearScale::new(y_min, y_max)?,
            span: PixelSpan::new(plot.bottom(), -plot.height)?,
        })
    }

    #[must_use]
    pub fn extent(self) -> (f64, f64) {
        self.scale.domain()
    }

    pub fn pixel_to_value(self, pixel_y: f64) -> ChartResult<f64> {
        self.scale.pixel_to_domain(pixel_y, self.span)
    }

    pub fn value_to_pixel(self, value: f64) -> ChartResult<f64> {
        self.scale.domain_to_pixel(value, self.span)
    }
}

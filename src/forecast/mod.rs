//! Rate estimation and completion forecasting.
//!
//! Everything here is a pure function of its arguments; the caller passes
//! `now` explicitly.

pub mod average;
pub mod prediction;
pub mod velocity;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::PixelPoint;
use crate::extract::Burnup;

pub use average::{AverageVelocity, IterationSelection, average_estimate};
pub use prediction::{Prediction, calculate_prediction};
pub use velocity::{
    DEFAULT_LOOKBACK_DAYS, ProjectStart, VelocityEstimate, calculate_velocity, value_on_or_before,
};

/// Anchor for all-time rates: the first completed observation.
#[must_use]
pub fn project_start(burnup: &Burnup) -> Option<ProjectStart> {
    burnup.completed_series.first().map(|point| ProjectStart {
        date: point.date,
        value: point.value,
    })
}

/// Pixel end points of the measured velocity window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocitySegment {
    pub start: PixelPoint,
    pub end: PixelPoint,
}

/// Maps a velocity window back onto the chart so an overlay line can be drawn.
///
/// Returns `None` when the chart axes were not readable.
#[must_use]
pub fn project_velocity_segment(
    burnup: &Burnup,
    estimate: &VelocityEstimate,
) -> Option<VelocitySegment> {
    let dates = burnup.date_axis()?;
    let values = burnup.value_axis()?;
    let point = |date: NaiveDate, value: f64| -> Option<PixelPoint> {
        Some(PixelPoint::new(
            dates.date_to_pixel(date).ok()?,
            values.value_to_pixel(value).ok()?,
        ))
    };

    Some(VelocitySegment {
        start: point(estimate.period_start, estimate.period_start_value)?,
        end: point(estimate.period_end, estimate.period_end_value)?,
    })
}

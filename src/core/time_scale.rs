use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{
    date_to_unix_seconds, datetime_to_unix_seconds, unix_seconds_to_datetime,
};
use crate::core::value_scale::ValueAxis;
use crate::core::{DateRange, DomainPoint, LinearScale, PixelPoint, PixelSpan, PlotRectangle};
use crate::error::{ChartError, ChartResult};

/// Horizontal calendar axis: pixel x <-> instant.
///
/// The domain is kept in unix seconds so the mapping stays linear.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateAxis {
    scale: LinearScale,
    span: PixelSpan,
}

impl DateAxis {
    /// Spreads `range` across the full plot width.
    pub fn new(range: DateRange, plot: PlotRectangle) -> ChartResult<Self> {
        Self::anchored(range, plot.left, plot.right())
    }

    /// Pins `range.start` to `start_px` and `range.end` to `end_px`.
    ///
    /// Used when the axis labels carry their own tick positions.
    pub fn anchored(range: DateRange, start_px: f64, end_px: f64) -> ChartResult<Self> {
        if !range.is_forward() {
            return Err(ChartError::InvalidData(format!(
                "date range must move forward: {} .. {}",
                range.start, range.end
            )));
        }
        if !(end_px > start_px) {
            return Err(ChartError::InvalidData(
                "date axis anchors must increase left to right".to_owned(),
            ));
        }

        Ok(Self {
            scale: LinearScale::new(
                date_to_unix_seconds(range.start),
                date_to_unix_seconds(range.end),
            )?,
            span: PixelSpan::new(start_px, end_px - start_px)?,
        })
    }

    /// Rebuilds an axis from plot-edge extrema in unix seconds.
    pub fn from_edges(x_min: f64, x_max: f64, plot: PlotRectangle) -> ChartResult<Self> {
        Ok(Self {
            scale: LinearScale::new(x_min, x_max)?,
            span: PixelSpan::new(plot.left, plot.width)?,
        })
    }

    pub fn pixel_to_seconds(self, pixel_x: f64) -> ChartResult<f64> {
        self.scale.pixel_to_domain(pixel_x, self.span)
    }

    pub fn pixel_to_datetime(self, pixel_x: f64) -> ChartResult<NaiveDateTime> {
        unix_seconds_to_datetime(self.pixel_to_seconds(pixel_x)?)
    }

    pub fn pixel_to_date(self, pixel_x: f64) -> ChartResult<NaiveDate> {
        Ok(self.pixel_to_datetime(pixel_x)?.date())
    }

    pub fn datetime_to_pixel(self, time: NaiveDateTime) -> ChartResult<f64> {
        self.scale.domain_to_pixel(datetime_to_unix_seconds(time), self.span)
    }

    pub fn date_to_pixel(self, date: NaiveDate) -> ChartResult<f64> {
        self.scale.domain_to_pixel(date_to_unix_seconds(date), self.span)
    }

    /// Unix-second values at the left and right plot edges.
    pub fn edges(self, plot: PlotRectangle) -> ChartResult<(f64, f64)> {
        Ok((
            self.pixel_to_seconds(plot.left)?,
            self.pixel_to_seconds(plot.right())?,
        ))
    }
}

/// Maps clipped pixel points to day-granular observations.
///
/// The renderer traces sub-day interpolation, so only the first point seen
/// for each calendar day is kept. Output is sorted by date.
#[must_use]
pub fn sample_daily(
    pixels: &[PixelPoint],
    date_axis: DateAxis,
    value_axis: ValueAxis,
) -> Vec<DomainPoint> {
    let mut by_day = BTreeMap::new();
    for pixel in pixels {
        let Ok(date) = date_axis.pixel_to_date(pixel.x) else {
            continue;
        };
        let Ok(value) = value_axis.pixel_to_value(pixel.y) else {
            continue;
        };
        if let Some(point) = DomainPoint::new(date, value) {
            by_day.entry(date).or_insert(point);
        }
    }
    by_day.into_values().collect()
}

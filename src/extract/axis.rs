use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use tracing::{debug, warn};

use crate::core::primitives::parse_decimal;
use crate::core::{DateAxis, DateRange, PlotRectangle, ValueAxis, parse_date_range};
use crate::error::{ChartError, ChartResult};
use crate::markup::AxisLabel;

/// Parses a value-axis tick label such as `"120"`, `"1,200"` or `"1.5k"`.
#[must_use]
pub fn parse_tick_value(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let (number, multiplier) = match trimmed.chars().last()? {
        'k' | 'K' => (&trimmed[..trimmed.len() - 1], 1_000.0),
        'M' => (&trimmed[..trimmed.len() - 1], 1_000_000.0),
        _ => (trimmed, 1.0),
    };
    parse_decimal(number, "tick value")
        .ok()
        .map(|value| value * multiplier)
}

/// Derives the value extent at the plot edges from the y-axis tick labels.
///
/// With positioned labels the line through the lowest and highest tick is
/// extended to the plot bottom and top. Without positions the smallest and
/// largest tick values are assumed to sit on the edges.
pub fn value_axis(labels: &[AxisLabel], plot: PlotRectangle) -> ChartResult<ValueAxis> {
    let ticks: Vec<(Option<f64>, f64)> = labels
        .iter()
        .filter_map(|label| parse_tick_value(&label.text).map(|value| (label.y, value)))
        .collect();
    if ticks.len() < 2 {
        return Err(ChartError::MissingElement("value axis tick labels"));
    }

    let positioned: Vec<(f64, f64)> = ticks
        .iter()
        .filter_map(|(y, value)| y.map(|y| (y, *value)))
        .collect();

    let (y_min, y_max) = if positioned.len() == ticks.len() {
        let bottom = positioned
            .iter()
            .copied()
            .max_by_key(|(y, _)| OrderedFloat(*y))
            .ok_or(ChartError::MissingElement("value axis tick labels"))?;
        let top = positioned
            .iter()
            .copied()
            .min_by_key(|(y, _)| OrderedFloat(*y))
            .ok_or(ChartError::MissingElement("value axis tick labels"))?;
        if bottom.0 == top.0 {
            return Err(ChartError::InvalidData(
                "value axis ticks share one pixel row".to_owned(),
            ));
        }
        let per_pixel = (top.1 - bottom.1) / (bottom.0 - top.0);
        (
            bottom.1 - (plot.bottom() - bottom.0) * per_pixel,
            top.1 + (top.0 - plot.top) * per_pixel,
        )
    } else {
        let values = ticks.iter().map(|(_, value)| OrderedFloat(*value));
        let min = values.clone().min().map_or(0.0, |v| v.0);
        let max = values.max().map_or(0.0, |v| v.0);
        (min, max)
    };

    debug!(y_min, y_max, ticks = ticks.len(), "derived value axis");
    ValueAxis::new(y_min, y_max, plot)
}

/// Date range spanned by the first and last x-axis labels (left to right).
#[must_use]
pub fn date_range(labels: &[AxisLabel], today: NaiveDate) -> Option<DateRange> {
    let (first, last) = outer_labels(labels)?;
    let range = parse_date_range(&first.text, &last.text, today);
    if range.is_none() {
        warn!(
            first = %first.text,
            last = %last.text,
            "axis labels do not parse as dates"
        );
    }
    range
}

/// Builds the pixel<->date mapping, pinning the range to the label positions when known.
pub fn date_axis(
    labels: &[AxisLabel],
    plot: PlotRectangle,
    today: NaiveDate,
) -> ChartResult<(DateRange, DateAxis)> {
    let range = date_range(labels, today).ok_or(ChartError::MissingElement("date axis labels"))?;
    let (first, last) = outer_labels(labels).ok_or(ChartError::MissingElement("date axis labels"))?;

    let axis = match (first.x, last.x) {
        (Some(start_px), Some(end_px)) if end_px > start_px => {
            DateAxis::anchored(range, start_px, end_px)?
        }
        _ => DateAxis::new(range, plot)?,
    };
    Ok((range, axis))
}

fn outer_labels(labels: &[AxisLabel]) -> Option<(&AxisLabel, &AxisLabel)> {
    if labels.len() < 2 {
        return None;
    }
    if labels.iter().all(|label| label.x.is_some()) {
        let key = |label: &&AxisLabel| OrderedFloat(label.x.unwrap_or_default());
        let first = labels.iter().min_by_key(key)?;
        let last = labels.iter().max_by_key(key)?;
        return Some((first, last));
    }
    Some((labels.first()?, labels.last()?))
}

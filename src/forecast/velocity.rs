use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::DomainPoint;
use crate::core::primitives::days_between;

pub const DEFAULT_LOOKBACK_DAYS: u32 = 21;

/// Where the project began: the first completed observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectStart {
    pub date: NaiveDate,
    pub value: f64,
}

/// A positive daily rate and the window it was measured over.
///
/// The rate is never reported without its window; callers receive
/// `Option<VelocityEstimate>` and `None` means "no estimate".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VelocityEstimate {
    pub current_rate: f64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub period_start_value: f64,
    pub period_end_value: f64,
}

impl VelocityEstimate {
    /// Builds an estimate only when the span and the rate are both positive.
    fn over(start: (NaiveDate, f64), end: (NaiveDate, f64)) -> Option<Self> {
        let span_days = days_between(start.0, end.0);
        if span_days <= 0 {
            trace!(span_days, "non-positive velocity window");
            return None;
        }
        let rate = (end.1 - start.1) / span_days as f64;
        if !(rate > 0.0 && rate.is_finite()) {
            trace!(rate, "non-positive velocity");
            return None;
        }

        Some(Self {
            current_rate: rate,
            period_start: start.0,
            period_end: end.0,
            period_start_value: start.1,
            period_end_value: end.1,
        })
    }
}

/// Daily completion rate over the trailing `lookback_days` window.
///
/// `series` must be sorted by date. The window ends at the latest
/// observation dated on or before `now` (or the earliest observation when
/// all lie in the future). A window with fewer than two observations falls
/// back to the all-time rate from `start`. A window reaching back past
/// `start` is clamped to it; otherwise its opening value is carried forward
/// from the last observation before the window.
#[must_use]
pub fn calculate_velocity(
    series: &[DomainPoint],
    start: ProjectStart,
    lookback_days: u32,
    now: NaiveDateTime,
) -> Option<VelocityEstimate> {
    let today = now.date();
    let latest = series
        .iter()
        .rev()
        .find(|point| point.date <= today)
        .or_else(|| series.first())?;

    let window_start = latest
        .date
        .checked_sub_days(Days::new(u64::from(lookback_days)))
        .unwrap_or(NaiveDate::MIN);
    let in_window: Vec<&DomainPoint> = series
        .iter()
        .filter(|point| point.date >= window_start && point.date <= latest.date)
        .collect();

    if in_window.len() < 2 {
        debug!(
            in_window = in_window.len(),
            lookback_days, "falling back to all-time velocity"
        );
        return VelocityEstimate::over(
            (start.date, start.value),
            (latest.date, latest.value),
        );
    }

    let opening = if window_start < start.date {
        debug!(%window_start, project_start = %start.date, "clamping velocity window");
        (start.date, start.value)
    } else {
        let first_in_window = in_window[0];
        let carried = series
            .iter()
            .rev()
            .find(|point| point.date < first_in_window.date)
            .map_or(first_in_window.value, |point| point.value);
        (window_start, carried)
    };

    VelocityEstimate::over(opening, (latest.date, latest.value))
}

/// Value of the last observation on or before `date`.
///
/// When `date` precedes every observation this returns the most recent
/// observation, not the earliest. That mirrors the charting page's own
/// lookup and is kept until it is confirmed against a live chart.
#[must_use]
pub fn value_on_or_before(series: &[DomainPoint], date: NaiveDate) -> Option<f64> {
    series
        .iter()
        .rev()
        .find(|point| point.date <= date)
        .or_else(|| series.last())
        .map(|point| point.value)
}

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extract::Burnup;
use crate::forecast::{
    Prediction, VelocityEstimate, VelocitySegment, calculate_prediction, calculate_velocity,
    project_start, project_velocity_segment, value_on_or_before,
};

use super::ForecastSettings;

/// Everything the presentation layer needs after a settings change or re-extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnupForecast {
    pub velocity: Option<VelocityEstimate>,
    pub prediction: Prediction,
    /// Open/total value at the end of the velocity window.
    pub scope_at_period_end: Option<f64>,
    pub velocity_segment: Option<VelocitySegment>,
}

/// Recomputes the forecast for an extracted burnup chart.
#[must_use]
pub fn forecast_burnup(
    burnup: &Burnup,
    settings: &ForecastSettings,
    now: NaiveDateTime,
) -> BurnupForecast {
    let settings = settings.clone().sanitized();
    let velocity = project_start(burnup).and_then(|start| {
        calculate_velocity(&burnup.completed_series, start, settings.lookback_days, now)
    });

    let prediction = match (burnup.total, burnup.completed) {
        (Some(total), Some(completed)) => calculate_prediction(
            total,
            completed,
            velocity.map(|v| v.current_rate),
            settings.due_date,
            now,
        ),
        _ => Prediction::unknown(settings.due_date),
    };

    debug!(
        rate = ?velocity.map(|v| v.current_rate),
        completion = ?prediction.completion_date,
        on_track = ?prediction.on_track,
        "recomputed burnup forecast"
    );

    BurnupForecast {
        velocity,
        prediction,
        scope_at_period_end: velocity
            .and_then(|v| value_on_or_before(&burnup.open_series, v.period_end)),
        velocity_segment: velocity
            .as_ref()
            .and_then(|v| project_velocity_segment(burnup, v)),
    }
}

/// [`forecast_burnup`] against the local clock.
#[must_use]
pub fn forecast_burnup_now(burnup: &Burnup, settings: &ForecastSettings) -> BurnupForecast {
    forecast_burnup(burnup, settings, Local::now().naive_local())
}

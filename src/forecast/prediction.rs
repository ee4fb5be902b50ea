use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::primitives::{add_fractional_days, fractional_days_between, start_of_day};

/// Completion forecast against an optional due date.
///
/// Derived on demand; every field is `None` when its inputs are unknown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub completion_date: Option<NaiveDateTime>,
    pub due_date: Option<NaiveDate>,
    pub ideal_rate: Option<f64>,
    pub on_track: Option<bool>,
    pub days_delta: Option<i64>,
}

impl Prediction {
    /// A prediction with unknown inputs: only the due date is echoed back.
    #[must_use]
    pub fn unknown(due_date: Option<NaiveDate>) -> Self {
        Self {
            completion_date: None,
            due_date,
            ideal_rate: None,
            on_track: None,
            days_delta: None,
        }
    }
}

/// Projects completion from the remaining work and the current daily rate.
///
/// Finished work completes `now` and is on track whatever the rate. A due
/// date counts from its midnight.
#[must_use]
pub fn calculate_prediction(
    total: f64,
    completed: f64,
    current_rate: Option<f64>,
    due_date: Option<NaiveDate>,
    now: NaiveDateTime,
) -> Prediction {
    if !total.is_finite() || !completed.is_finite() {
        return Prediction::unknown(due_date);
    }

    let remaining = (total - completed).max(0.0);
    let due_at = due_date.map(start_of_day);
    let days_delta_from = |completion: NaiveDateTime| {
        due_at.map(|due| fractional_days_between(completion, due).round() as i64)
    };

    if remaining == 0.0 {
        return Prediction {
            completion_date: Some(now),
            due_date,
            ideal_rate: Some(0.0),
            on_track: Some(true),
            days_delta: days_delta_from(now),
        };
    }

    let completion_date = current_rate
        .filter(|rate| *rate > 0.0 && rate.is_finite())
        .and_then(|rate| add_fractional_days(now, remaining / rate));
    if completion_date.is_none() {
        trace!(remaining, ?current_rate, "no completion date without a rate");
    }

    let ideal_rate = due_at.and_then(|due| {
        let days_until_due = fractional_days_between(now, due);
        (days_until_due > 0.0).then(|| remaining / days_until_due)
    });

    Prediction {
        completion_date,
        due_date,
        ideal_rate,
        on_track: completion_date.zip(due_at).map(|(done, due)| done <= due),
        days_delta: completion_date.and_then(days_delta_from),
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::forecast::{DEFAULT_LOOKBACK_DAYS, IterationSelection};

pub const MIN_LOOKBACK_DAYS: u32 = 1;
pub const MAX_LOOKBACK_DAYS: u32 = 365;

/// User-facing forecast settings.
///
/// Serializable so hosts can persist them in whatever key-value store they
/// use. Loading never fails: missing or malformed fields fall back to their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSettings {
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub selected_iterations: Vec<String>,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback_days(),
            due_date: None,
            selected_iterations: Vec::new(),
        }
    }
}

impl ForecastSettings {
    /// Sets the trailing window used for the current rate.
    #[must_use]
    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    /// Sets the target date the forecast is checked against.
    #[must_use]
    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    #[must_use]
    pub fn with_selected_iterations<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_iterations = names.into_iter().map(Into::into).collect();
        self
    }

    /// Clamps the lookback window into `1..=365` days.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.lookback_days = self
            .lookback_days
            .clamp(MIN_LOOKBACK_DAYS, MAX_LOOKBACK_DAYS);
        self
    }

    #[must_use]
    pub fn selection(&self) -> IterationSelection {
        IterationSelection::new(self.selected_iterations.iter().cloned())
    }

    /// Reads settings field by field, substituting defaults for anything unusable.
    #[must_use]
    pub fn from_json_lenient(input: &str) -> Self {
        let value: Value = match serde_json::from_str(input) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "settings are not valid json; using defaults");
                return Self::default();
            }
        };

        let lookback_days = match value.get("lookbackDays") {
            None | Some(Value::Null) => default_lookback_days(),
            Some(raw) => lenient_lookback(raw).unwrap_or_else(|| {
                warn!(%raw, "ignoring malformed lookbackDays");
                default_lookback_days()
            }),
        };

        let due_date = value
            .get("dueDate")
            .and_then(Value::as_str)
            .and_then(|text| NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok());

        let selected_iterations = value
            .get("selectedIterations")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            lookback_days,
            due_date,
            selected_iterations,
        }
        .sanitized()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn default_lookback_days() -> u32 {
    DEFAULT_LOOKBACK_DAYS
}

fn lenient_lookback(raw: &Value) -> Option<u32> {
    let days = match raw {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !days.is_finite() {
        return None;
    }
    Some(days.round().clamp(0.0, f64::from(u32::MAX)) as u32)
}

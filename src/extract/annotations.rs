//! Ground-truth point descriptions on cumulative charts.
//!
//! Each point marker describes itself as `"<date>, <value>. <Role>."`, e.g.
//! `"Jan 5, 2026, 48. Completed."`. The date may itself contain a comma, so
//! the sentence is taken apart from the right.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::primitives::parse_decimal;
use crate::core::{SeriesRole, parse_calendar_date};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub date: NaiveDate,
    pub value: f64,
    pub role: SeriesRole,
}

/// Exact latest values per role, when the chart annotates them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GroundTruth {
    pub open: Option<f64>,
    pub completed: Option<f64>,
}

/// Parses one point description. Dates without a year take `today`'s year.
#[must_use]
pub fn parse_annotation(text: &str, today: NaiveDate) -> Option<Annotation> {
    let body = text.trim().strip_suffix('.')?;
    let (head, role_text) = body.rsplit_once(". ")?;
    let role = SeriesRole::from_label(role_text.trim())?;
    let (date_text, value_text) = head.rsplit_once(", ")?;
    let value = parse_decimal(value_text, "annotation value").ok()?;
    let date = parse_calendar_date(date_text, today.year())?;

    Some(Annotation { date, value, role })
}

/// Parses every description, dropping the ones that do not follow the grammar.
#[must_use]
pub fn parse_annotations<'a>(
    descriptions: impl IntoIterator<Item = &'a str>,
    today: NaiveDate,
) -> Vec<Annotation> {
    descriptions
        .into_iter()
        .filter_map(|text| {
            let parsed = parse_annotation(text, today);
            if parsed.is_none() {
                trace!(text, "ignoring point description");
            }
            parsed
        })
        .collect()
}

/// Picks, per role, the annotation on the latest date not after `today`.
///
/// When every annotation for a role is in the future the chronologically
/// last one is used instead. Among equal dates the later annotation wins.
#[must_use]
pub fn select_ground_truth(annotations: &[Annotation], today: NaiveDate) -> GroundTruth {
    let pick = |role: SeriesRole| {
        let for_role = annotations.iter().filter(|a| a.role == role);
        let latest_past = for_role
            .clone()
            .filter(|a| a.date <= today)
            .max_by_key(|a| a.date);
        latest_past
            .or_else(|| for_role.max_by_key(|a| a.date))
            .map(|a| a.value)
    };

    GroundTruth {
        open: pick(SeriesRole::Open),
        completed: pick(SeriesRole::Completed),
    }
}

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::path::is_closed_polyline;
use crate::markup::ChartDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Burnup,
    Velocity,
    Unknown,
}

/// Labels a rendered chart by its structural markers.
///
/// Rules, first match wins:
/// 1. an area fill inside a series group means a cumulative chart;
/// 2. column markers whose first marker is drawn as a closed polyline and
///    described like an iteration mean a velocity chart;
/// 3. a plain line trace inside a series group means a cumulative chart.
#[must_use]
pub fn classify(doc: &ChartDocument<'_>) -> ChartKind {
    let containers = doc.series_containers();

    let kind = if containers.iter().any(|series| series.area_path.is_some()) {
        ChartKind::Burnup
    } else if first_column_marker_is_iteration(doc) {
        ChartKind::Velocity
    } else if containers.iter().any(|series| series.graph_path.is_some()) {
        ChartKind::Burnup
    } else {
        ChartKind::Unknown
    };

    debug!(?kind, series = containers.len(), "classified chart");
    kind
}

fn first_column_marker_is_iteration(doc: &ChartDocument<'_>) -> bool {
    let markers = doc.point_markers();
    let Some(first) = markers.iter().find(|marker| marker.in_column_series) else {
        return false;
    };

    let drawn_as_column = first.path_data.as_deref().is_some_and(is_closed_polyline);
    let described_as_iteration = first
        .description
        .as_deref()
        .is_some_and(looks_like_iteration);
    drawn_as_column && described_as_iteration
}

/// Accepts text containing `Iteration` or a `<number>[.<number>]. <word>` run.
#[must_use]
pub fn looks_like_iteration(text: &str) -> bool {
    text.contains("Iteration") || has_estimate_sentence(text)
}

fn has_estimate_sentence(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let starts_number = chars[i].is_ascii_digit()
            && (i == 0 || !(chars[i - 1].is_ascii_digit() || chars[i - 1] == '.'));
        if !starts_number {
            i += 1;
            continue;
        }

        let mut j = i;
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        if chars.get(j) == Some(&'.') && chars.get(j + 1).is_some_and(char::is_ascii_digit) {
            j += 1;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
        }
        if chars.get(j) == Some(&'.')
            && chars.get(j + 1) == Some(&' ')
            && chars.get(j + 2).is_some_and(|c| c.is_alphabetic())
        {
            return true;
        }
        i = j.max(i + 1);
    }
    false
}

//! Column-chart categories.
//!
//! Each column describes itself as `"<name>, <estimate>. [<group>.]"`, for
//! example `"Iteration 4, 21. Q3 planning."` or `"Sprint 9, 13.5."`.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::path::min_x;
use crate::core::primitives::parse_decimal;
use crate::markup::PointMarker;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationRecord {
    pub name: String,
    pub estimate: f64,
    pub group_name: Option<String>,
    /// Left-to-right position of the column on the chart.
    pub ordinal_index: usize,
}

/// Parsed annotation fields before an ordinal is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationAnnotation {
    pub name: String,
    pub estimate: f64,
    pub group_name: Option<String>,
}

/// Parses one column description.
///
/// The name may itself contain `", "`, so every separator is tried from the
/// left until the remainder reads as `<number>.` plus an optional group.
#[must_use]
pub fn parse_iteration_annotation(text: &str) -> Option<IterationAnnotation> {
    let text = text.trim();
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find(", ") {
        let split = search_from + offset;
        let name = text[..split].trim();
        if let Some((estimate, group_name)) = parse_estimate_tail(&text[split + 2..]) {
            if !name.is_empty() {
                return Some(IterationAnnotation {
                    name: name.to_owned(),
                    estimate,
                    group_name,
                });
            }
        }
        search_from = split + 2;
    }
    None
}

/// `tail := digits ('.' digits)? '.' (ws+ group '.'?)?`
fn parse_estimate_tail(tail: &str) -> Option<(f64, Option<String>)> {
    let bytes = tail.as_bytes();
    let mut end = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if end == 0 {
        return None;
    }
    if bytes.get(end) == Some(&b'.') && bytes.get(end + 1).is_some_and(u8::is_ascii_digit) {
        end += 1;
        end += bytes[end..].iter().take_while(|b| b.is_ascii_digit()).count();
    }
    if bytes.get(end) != Some(&b'.') {
        return None;
    }
    let estimate = parse_decimal(&tail[..end], "iteration estimate").ok()?;

    let rest = &tail[end + 1..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let group = rest.trim();
    let group = group.strip_suffix('.').unwrap_or(group).trim();
    let group_name = (!group.is_empty()).then(|| group.to_owned());
    Some((estimate, group_name))
}

/// Turns column markers into records ordered by their drawn x position.
///
/// Ordinals are assigned over every column before unparsable ones are
/// dropped, so they always reflect the position on the chart.
#[must_use]
pub fn extract_iterations(markers: &[PointMarker]) -> Vec<IterationRecord> {
    let mut columns: Vec<(f64, &PointMarker)> = markers
        .iter()
        .filter(|marker| marker.in_column_series)
        .map(|marker| {
            let x = marker
                .x
                .or_else(|| marker.path_data.as_deref().and_then(min_x))
                .unwrap_or(f64::INFINITY);
            (x, marker)
        })
        .collect();
    columns.sort_by_key(|(x, _)| OrderedFloat(*x));

    let records: Vec<IterationRecord> = columns
        .into_iter()
        .enumerate()
        .filter_map(|(ordinal_index, (_, marker))| {
            let text = marker.description.as_deref()?;
            let Some(parsed) = parse_iteration_annotation(text) else {
                trace!(text, "dropping unparsable column description");
                return None;
            };
            Some(IterationRecord {
                name: parsed.name,
                estimate: parsed.estimate,
                group_name: parsed.group_name,
                ordinal_index,
            })
        })
        .collect();

    debug!(records = records.len(), "extracted iteration records");
    records
}

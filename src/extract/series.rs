use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{PixelPoint, SeriesRole};
use crate::extract::annotations::GroundTruth;
use crate::markup::LegendItem;

/// Clipped pixel trace of one series container.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesCloud {
    pub series_index: Option<usize>,
    pub color: Option<String>,
    pub path_data: String,
    pub pixels: Vec<PixelPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Legend,
    Magnitude,
    SingleSeries,
    Unresolved,
}

/// Positions into the cloud slice chosen for each role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleAssignment {
    pub completed: Option<usize>,
    pub open: Option<usize>,
    pub resolution: Resolution,
}

/// Binds point clouds to semantic roles.
///
/// `final_levels[i]` is the last value of `clouds[i]` (higher means higher on
/// the chart). Legend text wins; otherwise the larger of the first two clouds
/// is `open` and the smaller `completed`; a lone cloud is `completed`.
#[must_use]
pub fn resolve_roles(
    legend: &[LegendItem],
    clouds: &[SeriesCloud],
    final_levels: &[Option<f64>],
) -> RoleAssignment {
    let mut completed = None;
    let mut open = None;

    for (position, item) in legend.iter().enumerate() {
        let Some(role) = SeriesRole::from_label(&item.text) else {
            continue;
        };
        let Some(cloud) = cloud_for_legend_item(item, position, clouds) else {
            debug!(legend = %item.text, "legend item has no matching series");
            continue;
        };
        let slot = match role {
            SeriesRole::Completed => &mut completed,
            SeriesRole::Open => &mut open,
        };
        if slot.is_none() {
            *slot = Some(cloud);
        }
    }

    if completed.is_some() || open.is_some() {
        let unassigned = (0..clouds.len()).find(|i| Some(*i) != completed && Some(*i) != open);
        if completed.is_none() {
            completed = unassigned;
        } else if open.is_none() {
            open = unassigned;
        }
        return RoleAssignment {
            completed,
            open,
            resolution: Resolution::Legend,
        };
    }

    match clouds.len() {
        0 => RoleAssignment {
            completed: None,
            open: None,
            resolution: Resolution::Unresolved,
        },
        1 => RoleAssignment {
            completed: Some(0),
            open: None,
            resolution: Resolution::SingleSeries,
        },
        _ => {
            let first = final_levels.first().copied().flatten();
            let second = final_levels.get(1).copied().flatten();
            let (completed, open) = match (first, second) {
                (Some(a), Some(b)) if a > b => (1, 0),
                _ => (0, 1),
            };
            RoleAssignment {
                completed: Some(completed),
                open: Some(open),
                resolution: Resolution::Magnitude,
            }
        }
    }
}

fn cloud_for_legend_item(
    item: &LegendItem,
    position: usize,
    clouds: &[SeriesCloud],
) -> Option<usize> {
    if let Some(index) = item.series_index {
        if let Some(found) = clouds.iter().position(|c| c.series_index == Some(index)) {
            return Some(found);
        }
    }
    if let Some(color) = item.color.as_deref() {
        if let Some(found) = clouds.iter().position(|c| c.color.as_deref() == Some(color)) {
            return Some(found);
        }
    }
    (position < clouds.len()).then_some(position)
}

/// Final `total`/`completed` figures after applying ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub total: Option<f64>,
    pub completed: Option<f64>,
    /// The completed and total roles were exchanged to restore `completed <= total`.
    pub swapped: bool,
}

/// Merges path-derived values with annotation values.
///
/// Annotations are exact, so they replace path readings. The open annotation
/// is the unstacked open count, so `total = open + completed` in that case;
/// the path-derived open trace is already stacked and is used as the total.
#[must_use]
pub fn reconcile(
    path_completed: Option<f64>,
    path_total: Option<f64>,
    truth: GroundTruth,
) -> Reconciliation {
    let completed = truth.completed.or(path_completed.map(f64::round));
    let total = match truth.open {
        Some(open) => Some(open + completed.unwrap_or(0.0)),
        None => path_total.map(f64::round),
    };

    match (completed, total) {
        (Some(c), Some(t)) if t > 0.0 && c > t => {
            warn!(completed = c, total = t, "completed exceeds total; swapping roles");
            Reconciliation {
                total: Some(c),
                completed: Some(t),
                swapped: true,
            }
        }
        _ => Reconciliation {
            total,
            completed,
            swapped: false,
        },
    }
}

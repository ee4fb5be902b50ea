//! Chart reconstruction from rendered markup.
//!
//! [`extract_chart`] is a pure function of the markup and the current date:
//! unchanged input always yields an equal result.

pub mod annotations;
pub mod axis;
pub mod burnup;
pub mod classifier;
pub mod iterations;
pub mod series;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{AxisExtrema, PlotRectangle};
use crate::error::ChartResult;
use crate::markup::{Axis, ChartDocument};

pub use annotations::{Annotation, GroundTruth, parse_annotation, select_ground_truth};
pub use burnup::Burnup;
pub use classifier::{ChartKind, classify, looks_like_iteration};
pub use iterations::{IterationRecord, extract_iterations, parse_iteration_annotation};
pub use series::{Reconciliation, Resolution, RoleAssignment, reconcile, resolve_roles};

/// Categorical bars recovered from a column (velocity) chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VelocityChart {
    pub iterations: Vec<IterationRecord>,
    pub plot_geometry: PlotRectangle,
    /// `x` in ordinal column space, `y` from the value-axis labels.
    pub extrema: Option<AxisExtrema>,
}

/// Result of one extraction pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartExtraction {
    Burnup(Burnup),
    Velocity(VelocityChart),
}

impl ChartExtraction {
    #[must_use]
    pub fn kind(&self) -> ChartKind {
        match self {
            Self::Burnup(_) => ChartKind::Burnup,
            Self::Velocity(_) => ChartKind::Velocity,
        }
    }

    #[must_use]
    pub fn plot_geometry(&self) -> PlotRectangle {
        match self {
            Self::Burnup(burnup) => burnup.plot_geometry,
            Self::Velocity(velocity) => velocity.plot_geometry,
        }
    }
}

/// Reconstructs a chart from its rendered markup.
///
/// Returns `None` when the markup does not parse, the chart kind is not
/// recognised, or a required element (plot background, series) is missing.
/// Partial results are never returned.
#[must_use]
pub fn extract_chart(markup: &str, today: NaiveDate) -> Option<ChartExtraction> {
    match try_extract(markup, today) {
        Ok(extraction) => extraction,
        Err(err) => {
            warn!(error = %err, "chart extraction aborted");
            None
        }
    }
}

/// [`extract_chart`] against the local calendar date.
#[must_use]
pub fn extract_chart_now(markup: &str) -> Option<ChartExtraction> {
    extract_chart(markup, Local::now().date_naive())
}

fn try_extract(markup: &str, today: NaiveDate) -> ChartResult<Option<ChartExtraction>> {
    let doc = ChartDocument::parse(markup)?;
    let kind = classify(&doc);
    if kind == ChartKind::Unknown {
        debug!("markup holds no recognised chart");
        return Ok(None);
    }

    let plot = doc.plot_rectangle()?;
    let extraction = match kind {
        ChartKind::Burnup => ChartExtraction::Burnup(burnup::extract_burnup(&doc, plot, today)?),
        ChartKind::Velocity => ChartExtraction::Velocity(extract_velocity(&doc, plot)),
        ChartKind::Unknown => return Ok(None),
    };
    Ok(Some(extraction))
}

fn extract_velocity(doc: &ChartDocument<'_>, plot: PlotRectangle) -> VelocityChart {
    let iterations = extract_iterations(&doc.point_markers());
    let extrema = axis::value_axis(&doc.axis_labels(Axis::Y), plot)
        .ok()
        .map(|values| {
            let (y_min, y_max) = values.extent();
            AxisExtrema {
                x_min: 0.0,
                x_max: iterations
                    .iter()
                    .map(|record| record.ordinal_index)
                    .max()
                    .unwrap_or_default() as f64,
                y_min,
                y_max,
            }
        });

    VelocityChart {
        iterations,
        plot_geometry: plot,
        extrema,
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{
    AxisExtrema, DateAxis, DateRange, DomainPoint, PixelPoint, PlotRectangle, ValueAxis,
    first_point_within, last_point_within, points_within, sample_daily,
};
use crate::error::{ChartError, ChartResult};
use crate::extract::annotations::{parse_annotations, select_ground_truth};
use crate::extract::axis;
use crate::extract::series::{SeriesCloud, reconcile, resolve_roles};
use crate::markup::{Axis, ChartDocument};

/// Figures and series recovered from a cumulative (burnup) chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Burnup {
    pub total: Option<f64>,
    pub completed: Option<f64>,
    pub completed_series: Vec<DomainPoint>,
    pub open_series: Vec<DomainPoint>,
    pub completed_start_pixel: Option<PixelPoint>,
    pub completed_last_pixel: Option<PixelPoint>,
    pub date_range: Option<DateRange>,
    pub plot_geometry: PlotRectangle,
    /// Plot-edge extrema; `x` in unix seconds. Present when both axes were readable.
    pub extrema: Option<AxisExtrema>,
}

impl Burnup {
    /// Date axis rebuilt from the stored extrema.
    #[must_use]
    pub fn date_axis(&self) -> Option<DateAxis> {
        let extrema = self.extrema?;
        DateAxis::from_edges(extrema.x_min, extrema.x_max, self.plot_geometry).ok()
    }

    /// Value axis rebuilt from the stored extrema.
    #[must_use]
    pub fn value_axis(&self) -> Option<ValueAxis> {
        let extrema = self.extrema?;
        ValueAxis::new(extrema.y_min, extrema.y_max, self.plot_geometry).ok()
    }
}

pub(crate) fn extract_burnup(
    doc: &ChartDocument<'_>,
    plot: PlotRectangle,
    today: NaiveDate,
) -> ChartResult<Burnup> {
    let clouds: Vec<SeriesCloud> = doc
        .series_containers()
        .into_iter()
        .filter_map(|series| {
            let path_data = series.trace_path()?.to_owned();
            let pixels = points_within(&path_data, plot);
            Some(SeriesCloud {
                series_index: series.series_index,
                color: series.color,
                path_data,
                pixels,
            })
        })
        .collect();
    if clouds.is_empty() {
        return Err(ChartError::MissingElement("series container"));
    }

    let value_axis = axis::value_axis(&doc.axis_labels(Axis::Y), plot)
        .inspect_err(|err| warn!(error = %err, "value axis unavailable"))
        .ok();
    let date_axis = axis::date_axis(&doc.axis_labels(Axis::X), plot, today)
        .inspect_err(|err| warn!(error = %err, "date axis unavailable"))
        .ok();

    let final_levels: Vec<Option<f64>> = clouds
        .iter()
        .map(|cloud| final_level(cloud, value_axis))
        .collect();
    let roles = resolve_roles(&doc.legend_items(), &clouds, &final_levels);
    debug!(?roles, clouds = clouds.len(), "resolved series roles");

    let markers = doc.point_markers();
    let annotations = parse_annotations(
        markers.iter().filter_map(|m| m.description.as_deref()),
        today,
    );
    let truth = select_ground_truth(&annotations, today);
    debug!(
        annotations = annotations.len(),
        open = ?truth.open,
        completed = ?truth.completed,
        "selected ground truth"
    );

    let path_value = |position: Option<usize>| {
        let cloud = &clouds[position?];
        value_axis?.pixel_to_value(cloud.pixels.last()?.y).ok()
    };
    let reconciled = reconcile(path_value(roles.completed), path_value(roles.open), truth);

    let (completed_at, open_at) = if reconciled.swapped {
        (roles.open, roles.completed)
    } else {
        (roles.completed, roles.open)
    };
    let completed_cloud = completed_at.map(|i| &clouds[i]);
    let open_cloud = open_at.map(|i| &clouds[i]);

    let daily = |cloud: Option<&SeriesCloud>| match (cloud, date_axis, value_axis) {
        (Some(cloud), Some((_, dates)), Some(values)) => {
            sample_daily(&cloud.pixels, dates, values)
        }
        _ => Vec::new(),
    };

    let extrema = match (date_axis, value_axis) {
        (Some((_, dates)), Some(values)) => {
            let (x_min, x_max) = dates.edges(plot)?;
            let (y_min, y_max) = values.extent();
            Some(AxisExtrema {
                x_min,
                x_max,
                y_min,
                y_max,
            })
        }
        _ => None,
    };

    Ok(Burnup {
        total: reconciled.total,
        completed: reconciled.completed,
        completed_series: daily(completed_cloud),
        open_series: daily(open_cloud),
        completed_start_pixel: completed_cloud
            .and_then(|cloud| first_point_within(&cloud.path_data, plot)),
        completed_last_pixel: completed_cloud
            .and_then(|cloud| last_point_within(&cloud.path_data, plot)),
        date_range: date_axis.map(|(range, _)| range),
        plot_geometry: plot,
        extrema,
    })
}

/// Last value of a cloud, or its inverted pixel height when no value axis is readable.
fn final_level(cloud: &SeriesCloud, value_axis: Option<ValueAxis>) -> Option<f64> {
    let last = cloud.pixels.last()?;
    match value_axis {
        Some(axis) => axis.pixel_to_value(last.y).ok(),
        None => Some(-last.y),
    }
}

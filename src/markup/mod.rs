//! Read-only view over a rendered chart fragment.
//!
//! The fragment is the SVG the charting library draws. Elements are located
//! by their `highcharts-*` class tokens; nothing here interprets geometry or
//! text beyond collecting it.

use roxmltree::{Document, Node};
use tracing::debug;

use crate::core::PlotRectangle;
use crate::error::{ChartError, ChartResult};

const PLOT_BACKGROUND: &str = "highcharts-plot-background";
const SERIES: &str = "highcharts-series";
const SERIES_INDEX_PREFIX: &str = "highcharts-series-";
const AREA_PATH: &str = "highcharts-area";
const GRAPH_PATH: &str = "highcharts-graph";
const POINT: &str = "highcharts-point";
const LEGEND_ITEM: &str = "highcharts-legend-item";
const X_AXIS_LABELS: &str = "highcharts-xaxis-labels";
const Y_AXIS_LABELS: &str = "highcharts-yaxis-labels";
const COLUMN_SERIES_KINDS: &[&str] = &["highcharts-column-series", "highcharts-bar-series"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Text of one axis tick label and where it was drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub text: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub text: String,
    pub color: Option<String>,
    pub series_index: Option<usize>,
}

/// A `highcharts-series` group with the paths it draws.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesContainer {
    pub series_index: Option<usize>,
    pub area_path: Option<String>,
    pub graph_path: Option<String>,
    pub color: Option<String>,
    pub is_column: bool,
}

impl SeriesContainer {
    /// Path used for sampling: the line trace when present, the area outline otherwise.
    #[must_use]
    pub fn trace_path(&self) -> Option<&str> {
        self.graph_path.as_deref().or(self.area_path.as_deref())
    }
}

/// A `highcharts-point` element and its accessible description.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMarker {
    pub series_index: Option<usize>,
    pub description: Option<String>,
    pub path_data: Option<String>,
    pub x: Option<f64>,
    pub in_column_series: bool,
}

#[derive(Debug)]
pub struct ChartDocument<'input> {
    doc: Document<'input>,
}

impl<'input> ChartDocument<'input> {
    pub fn parse(markup: &'input str) -> ChartResult<Self> {
        let doc = Document::parse(markup).map_err(|e| ChartError::Markup(e.to_string()))?;
        Ok(Self { doc })
    }

    fn elements_with_class<'a>(
        &'a self,
        class: &'a str,
    ) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
        self.doc
            .descendants()
            .filter(move |node| has_class(*node, class))
    }

    /// Reads the background rectangle that bounds the plotting area.
    pub fn plot_rectangle(&self) -> ChartResult<PlotRectangle> {
        let rect = self
            .elements_with_class(PLOT_BACKGROUND)
            .next()
            .ok_or(ChartError::MissingElement("plot background rectangle"))?;
        let attr = |name: &'static str| {
            attr_f64(rect, name).ok_or(ChartError::MissingElement("plot background geometry"))
        };
        // Highcharts omits x/y when they are zero.
        let left = attr_f64(rect, "x").unwrap_or(0.0);
        let top = attr_f64(rect, "y").unwrap_or(0.0);
        PlotRectangle::new(left, top, attr("width")?, attr("height")?)
    }

    pub fn series_containers(&self) -> Vec<SeriesContainer> {
        self.elements_with_class(SERIES)
            .map(|group| {
                let child_path = |class: &str| {
                    group
                        .descendants()
                        .find(|node| has_class(*node, class))
                        .and_then(|node| node.attribute("d"))
                        .map(str::to_owned)
                };
                let color = group
                    .descendants()
                    .filter(|node| has_class(*node, GRAPH_PATH) || has_class(*node, AREA_PATH))
                    .find_map(paint_color);
                SeriesContainer {
                    series_index: series_index(group),
                    area_path: child_path(AREA_PATH),
                    graph_path: child_path(GRAPH_PATH),
                    color,
                    is_column: is_column_group(group),
                }
            })
            .collect()
    }

    pub fn point_markers(&self) -> Vec<PointMarker> {
        self.elements_with_class(POINT)
            .map(|node| PointMarker {
                series_index: node.ancestors().find_map(series_index),
                description: description(node),
                path_data: node.attribute("d").map(str::to_owned),
                x: attr_f64(node, "x"),
                in_column_series: node.ancestors().any(is_column_group),
            })
            .collect()
    }

    pub fn legend_items(&self) -> Vec<LegendItem> {
        self.elements_with_class(LEGEND_ITEM)
            .map(|item| LegendItem {
                text: collect_text(item),
                color: item
                    .descendants()
                    .skip(1)
                    .filter(|node| !node.has_tag_name("text") && !node.has_tag_name("tspan"))
                    .find_map(paint_color),
                series_index: series_index(item),
            })
            .collect()
    }

    pub fn axis_labels(&self, axis: Axis) -> Vec<AxisLabel> {
        let class = match axis {
            Axis::X => X_AXIS_LABELS,
            Axis::Y => Y_AXIS_LABELS,
        };
        let labels: Vec<AxisLabel> = self
            .elements_with_class(class)
            .flat_map(|group| group.children().filter(|n| n.has_tag_name("text")))
            .map(|text| AxisLabel {
                text: collect_text(text),
                x: attr_f64(text, "x"),
                y: attr_f64(text, "y"),
            })
            .filter(|label| !label.text.is_empty())
            .collect();
        debug!(?axis, count = labels.len(), "collected axis labels");
        labels
    }
}

fn has_class(node: Node<'_, '_>, class: &str) -> bool {
    node.is_element()
        && node
            .attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|token| token == class))
}

fn series_index(node: Node<'_, '_>) -> Option<usize> {
    node.attribute("class")?
        .split_whitespace()
        .find_map(|token| token.strip_prefix(SERIES_INDEX_PREFIX)?.parse().ok())
}

fn is_column_group(node: Node<'_, '_>) -> bool {
    COLUMN_SERIES_KINDS.iter().any(|kind| has_class(node, kind))
}

fn attr_f64(node: Node<'_, '_>, name: &str) -> Option<f64> {
    node.attribute(name)?
        .trim()
        .trim_end_matches("px")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn paint_color(node: Node<'_, '_>) -> Option<String> {
    ["stroke", "fill"]
        .into_iter()
        .filter_map(|name| node.attribute(name))
        .map(str::trim)
        .find(|value| !value.is_empty() && *value != "none" && *value != "transparent")
        .map(str::to_ascii_lowercase)
}

fn description(node: Node<'_, '_>) -> Option<String> {
    if let Some(label) = node.attribute("aria-label") {
        return Some(label.trim().to_owned());
    }
    node.children()
        .find(|child| child.has_tag_name("desc") || child.has_tag_name("title"))
        .map(collect_text)
        .filter(|text| !text.is_empty())
}

/// Joins descendant text nodes with single spaces.
fn collect_text(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

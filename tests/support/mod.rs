#![allow(dead_code)]

use chrono::NaiveDate;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn today() -> NaiveDate {
    date(2026, 1, 10)
}

/// Plot: x 50..650, y 10..310. Dec 1 2025 at x=50, Dec 31 2025 at x=650
/// (20 px per day). Values 0 at y=310 and 100 at y=10 (3 px per unit).
pub const PLOT_RECT: &str =
    r#"<rect class="highcharts-plot-background" x="50" y="10" width="600" height="300"/>"#;

pub const X_LABELS: &str = r#"<g class="highcharts-axis-labels highcharts-xaxis-labels">
    <text x="50" y="330"><tspan>Dec 1</tspan></text>
    <text x="350" y="330"><tspan>Dec 16</tspan></text>
    <text x="650" y="330"><tspan>Dec 31, 2025</tspan></text>
  </g>"#;

pub const Y_LABELS: &str = r#"<g class="highcharts-axis-labels highcharts-yaxis-labels">
    <text x="40" y="310">0</text>
    <text x="40" y="160">50</text>
    <text x="40" y="10">100</text>
  </g>"#;

/// Stacked total trace: 40, 45, 50, 60.
pub const OPEN_GRAPH: &str = "M 50 190 L 150 175 L 350 160 L 650 130";
/// Completed trace: 0, 10, (sub-day 10.33), 20, 30.
pub const COMPLETED_GRAPH: &str = "M 50 310 L 150 280 L 155 279 L 350 250 L 650 220";

pub fn area_of(graph: &str) -> String {
    format!("{graph} L 650 310 L 50 310 Z")
}

pub struct BurnupFixture {
    pub legend: Vec<(usize, &'static str)>,
    pub series: Vec<(usize, String)>,
    pub annotations: Vec<(usize, &'static str)>,
    pub with_area: bool,
    pub x_labels: String,
}

impl Default for BurnupFixture {
    fn default() -> Self {
        Self {
            legend: vec![(0, "Open"), (1, "Completed")],
            series: vec![(0, OPEN_GRAPH.to_owned()), (1, COMPLETED_GRAPH.to_owned())],
            annotations: Vec::new(),
            with_area: true,
            x_labels: X_LABELS.to_owned(),
        }
    }
}

impl BurnupFixture {
    pub fn render(&self) -> String {
        let legend: String = self
            .legend
            .iter()
            .map(|(index, text)| {
                format!(
                    r#"<g class="highcharts-legend-item highcharts-series-{index}">
      <text x="20" y="15"><tspan>{text}</tspan></text>
      <path class="highcharts-graph" stroke="{}" d="M 0 11 L 16 11"/>
    </g>"#,
                    color(*index)
                )
            })
            .collect();

        let series: String = self
            .series
            .iter()
            .map(|(index, graph)| {
                let area = if self.with_area {
                    format!(
                        r#"<path class="highcharts-area" fill="{}" d="{}"/>"#,
                        color(*index),
                        area_of(graph)
                    )
                } else {
                    String::new()
                };
                format!(
                    r#"<g class="highcharts-series highcharts-series-{index} highcharts-area-series">
      {area}
      <path class="highcharts-graph" stroke="{}" d="{graph}"/>
    </g>"#,
                    color(*index)
                )
            })
            .collect();

        let markers: String = self
            .annotations
            .iter()
            .map(|(index, label)| {
                format!(
                    r#"<g class="highcharts-markers highcharts-series-{index}">
      <path class="highcharts-point" aria-label="{label}" d="M 646 216 L 654 216 L 654 224 Z"/>
    </g>"#
                )
            })
            .collect();

        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" class="highcharts-root" width="700" height="400">
  {PLOT_RECT}
  {x_labels}
  {Y_LABELS}
  <g class="highcharts-legend">{legend}</g>
  <g class="highcharts-series-group">
    {series}
    {markers}
  </g>
</svg>"#,
            x_labels = self.x_labels
        )
    }
}

fn color(index: usize) -> &'static str {
    match index {
        0 => "#2da44e",
        1 => "#8250df",
        _ => "#bf8700",
    }
}

/// Column chart with three drawn columns, listed out of x order in the markup.
pub fn velocity_svg(first_label: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="highcharts-root">
  {PLOT_RECT}
  {Y_LABELS}
  <g class="highcharts-series-group">
    <g class="highcharts-series highcharts-series-0 highcharts-column-series">
      <path class="highcharts-point" aria-label="{first_label}" d="M 100 250 L 140 250 L 140 310 L 100 310 Z"/>
      <path class="highcharts-point" aria-label="Iteration 3, 12.5." d="M 500 160 L 540 160 L 540 310 L 500 310 Z"/>
      <path class="highcharts-point" aria-label="Iteration 2, 8. Platform." d="M 300 190 L 340 190 L 340 310 L 300 310 Z"/>
      <path class="highcharts-point" aria-label="Backlog grooming" d="M 600 300 L 640 300 L 640 310 L 600 310 Z"/>
    </g>
  </g>
</svg>"#
    )
}

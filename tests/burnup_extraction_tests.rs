mod support;

use approx::assert_relative_eq;
use burnup_lens::core::primitives::date_to_unix_seconds;
use burnup_lens::core::{DateRange, DomainPoint, PixelPoint};
use burnup_lens::extract::{Burnup, ChartKind};
use burnup_lens::{ChartExtraction, extract_chart};
use chrono::NaiveDate;
use support::{BurnupFixture, PLOT_RECT, date, today};

fn extract_burnup(markup: &str) -> Burnup {
    match extract_chart(markup, today()) {
        Some(ChartExtraction::Burnup(burnup)) => burnup,
        other => panic!("expected a burnup extraction, got {other:?}"),
    }
}

fn dates(series: &[DomainPoint]) -> Vec<NaiveDate> {
    series.iter().map(|point| point.date).collect()
}

fn values(series: &[DomainPoint]) -> Vec<f64> {
    series.iter().map(|point| point.value).collect()
}

#[test]
fn full_chart_yields_totals_series_and_geometry() {
    let burnup = extract_burnup(&BurnupFixture::default().render());

    assert_eq!(burnup.total, Some(60.0));
    assert_eq!(burnup.completed, Some(30.0));
    assert_eq!(
        burnup.date_range,
        Some(DateRange::new(date(2025, 12, 1), date(2025, 12, 31)))
    );
    assert_eq!(
        (burnup.plot_geometry.left, burnup.plot_geometry.width),
        (50.0, 600.0)
    );
    assert_eq!(burnup.completed_start_pixel, Some(PixelPoint::new(50.0, 310.0)));
    assert_eq!(burnup.completed_last_pixel, Some(PixelPoint::new(650.0, 220.0)));
}

#[test]
fn series_are_sampled_once_per_day() {
    let burnup = extract_burnup(&BurnupFixture::default().render());

    let expected_dates = vec![
        date(2025, 12, 1),
        date(2025, 12, 6),
        date(2025, 12, 16),
        date(2025, 12, 31),
    ];
    assert_eq!(dates(&burnup.completed_series), expected_dates);
    assert_eq!(dates(&burnup.open_series), expected_dates);

    for (actual, expected) in values(&burnup.completed_series)
        .into_iter()
        .zip([0.0, 10.0, 20.0, 30.0])
    {
        assert_relative_eq!(actual, expected, epsilon = 1e-9);
    }
    for (actual, expected) in values(&burnup.open_series)
        .into_iter()
        .zip([40.0, 45.0, 50.0, 60.0])
    {
        assert_relative_eq!(actual, expected, epsilon = 1e-9);
    }
}

#[test]
fn extrema_describe_the_plot_edges() {
    let burnup = extract_burnup(&BurnupFixture::default().render());
    let extrema = burnup.extrema.expect("extrema");

    assert_eq!(extrema.x_min, date_to_unix_seconds(date(2025, 12, 1)));
    assert_eq!(extrema.x_max, date_to_unix_seconds(date(2025, 12, 31)));
    assert_relative_eq!(extrema.y_min, 0.0, epsilon = 1e-9);
    assert_relative_eq!(extrema.y_max, 100.0, epsilon = 1e-9);

    let date_axis = burnup.date_axis().expect("rebuilt date axis");
    assert_eq!(date_axis.pixel_to_date(350.0).expect("date"), date(2025, 12, 16));
    let value_axis = burnup.value_axis().expect("rebuilt value axis");
    assert_relative_eq!(value_axis.pixel_to_value(160.0).expect("value"), 50.0, epsilon = 1e-9);
}

#[test]
fn annotations_override_path_readings() {
    let fixture = BurnupFixture {
        annotations: vec![
            (1, "Dec 31, 2025, 31. Completed."),
            (0, "Dec 31, 2025, 33. Open."),
            (0, "Dec 16, 2025, 70. Open."),
        ],
        ..BurnupFixture::default()
    };
    let burnup = extract_burnup(&fixture.render());

    assert_eq!(burnup.completed, Some(31.0));
    assert_eq!(burnup.total, Some(64.0));
}

#[test]
fn roles_come_from_magnitude_without_legend() {
    let fixture = BurnupFixture {
        legend: Vec::new(),
        ..BurnupFixture::default()
    };
    let burnup = extract_burnup(&fixture.render());

    assert_eq!(burnup.total, Some(60.0));
    assert_eq!(burnup.completed, Some(30.0));
    assert_relative_eq!(
        burnup.completed_series.last().expect("last").value,
        30.0,
        epsilon = 1e-9
    );
}

#[test]
fn inverted_legend_is_repaired_by_swapping() {
    let fixture = BurnupFixture {
        legend: vec![(0, "Completed"), (1, "Open")],
        ..BurnupFixture::default()
    };
    let burnup = extract_burnup(&fixture.render());

    assert_eq!(burnup.total, Some(60.0));
    assert_eq!(burnup.completed, Some(30.0));
    assert_relative_eq!(
        burnup.open_series.last().expect("last").value,
        60.0,
        epsilon = 1e-9
    );
    assert_eq!(burnup.completed_last_pixel, Some(PixelPoint::new(650.0, 220.0)));
}

#[test]
fn unreadable_date_axis_keeps_totals_without_series() {
    let fixture = BurnupFixture {
        x_labels: String::new(),
        ..BurnupFixture::default()
    };
    let burnup = extract_burnup(&fixture.render());

    assert_eq!(burnup.total, Some(60.0));
    assert_eq!(burnup.completed, Some(30.0));
    assert!(burnup.completed_series.is_empty());
    assert!(burnup.open_series.is_empty());
    assert_eq!(burnup.date_range, None);
    assert_eq!(burnup.extrema, None);
}

#[test]
fn single_series_is_completed() {
    let fixture = BurnupFixture {
        legend: Vec::new(),
        series: vec![(3, support::COMPLETED_GRAPH.to_owned())],
        ..BurnupFixture::default()
    };
    let burnup = extract_burnup(&fixture.render());

    assert_eq!(burnup.completed, Some(30.0));
    assert_eq!(burnup.total, None);
    assert!(burnup.open_series.is_empty());
}

#[test]
fn extraction_is_idempotent() {
    let markup = BurnupFixture::default().render();
    let first = extract_chart(&markup, today());
    let second = extract_chart(&markup, today());

    assert!(first.is_some());
    assert_eq!(first, second);
    assert_eq!(first.map(|e| e.kind()), Some(ChartKind::Burnup));
}

#[test]
fn missing_plot_background_yields_nothing() {
    let markup = BurnupFixture::default().render().replace(PLOT_RECT, "");
    assert_eq!(extract_chart(&markup, today()), None);
}

#[test]
fn unrecognised_or_broken_markup_yields_nothing() {
    assert_eq!(extract_chart("", today()), None);
    assert_eq!(extract_chart("<svg><g></svg>", today()), None);
    assert_eq!(
        extract_chart(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><g class="highcharts-legend"/></svg>"#,
            today()
        ),
        None
    );
}

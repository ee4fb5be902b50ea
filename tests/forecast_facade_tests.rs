mod support;

use approx::assert_relative_eq;
use burnup_lens::extract::Burnup;
use burnup_lens::forecast::project_start;
use burnup_lens::{ChartExtraction, ForecastSettings, extract_chart, forecast_burnup};
use chrono::NaiveDateTime;
use support::{BurnupFixture, date, today};

fn burnup() -> Burnup {
    match extract_chart(&BurnupFixture::default().render(), today()) {
        Some(ChartExtraction::Burnup(burnup)) => burnup,
        other => panic!("expected burnup, got {other:?}"),
    }
}

fn now() -> NaiveDateTime {
    date(2026, 1, 10).and_hms_opt(12, 0, 0).expect("now")
}

#[test]
fn project_starts_at_first_completed_observation() {
    let start = project_start(&burnup()).expect("start");
    assert_eq!(start.date, date(2025, 12, 1));
    assert_relative_eq!(start.value, 0.0, epsilon = 1e-9);
}

#[test]
fn forecast_uses_trailing_window() {
    let forecast = forecast_burnup(&burnup(), &ForecastSettings::default(), now());
    let velocity = forecast.velocity.expect("velocity");

    assert_eq!(velocity.period_start, date(2025, 12, 10));
    assert_eq!(velocity.period_end, date(2025, 12, 31));
    assert_relative_eq!(velocity.current_rate, 20.0 / 21.0, epsilon = 1e-9);
    assert_relative_eq!(
        forecast.scope_at_period_end.expect("scope"),
        60.0,
        epsilon = 1e-9
    );

    let completion = forecast.prediction.completion_date.expect("completion");
    assert_eq!(completion.date(), date(2026, 2, 11));
    assert_eq!(forecast.prediction.on_track, None);
}

#[test]
fn velocity_segment_maps_window_onto_chart() {
    let forecast = forecast_burnup(&burnup(), &ForecastSettings::default(), now());
    let segment = forecast.velocity_segment.expect("segment");

    assert_relative_eq!(segment.start.x, 230.0, epsilon = 1e-6);
    assert_relative_eq!(segment.start.y, 280.0, epsilon = 1e-6);
    assert_relative_eq!(segment.end.x, 650.0, epsilon = 1e-6);
    assert_relative_eq!(segment.end.y, 220.0, epsilon = 1e-6);
}

#[test]
fn due_date_drives_on_track_status() {
    let settings = ForecastSettings::default().with_due_date(Some(date(2026, 3, 1)));
    let forecast = forecast_burnup(&burnup(), &settings, now());

    assert_eq!(forecast.prediction.on_track, Some(true));
    assert_eq!(forecast.prediction.days_delta, Some(18));
    assert!(forecast.prediction.ideal_rate.expect("ideal") > 0.0);

    let tight = ForecastSettings::default().with_due_date(Some(date(2026, 1, 31)));
    let late = forecast_burnup(&burnup(), &tight, now());
    assert_eq!(late.prediction.on_track, Some(false));
}

#[test]
fn lookback_is_clamped_before_use() {
    let forecast = forecast_burnup(
        &burnup(),
        &ForecastSettings::default().with_lookback_days(0),
        now(),
    );
    let velocity = forecast.velocity.expect("velocity");
    assert_eq!(velocity.period_start, date(2025, 12, 1));
}

#[test]
fn missing_totals_give_unknown_prediction() {
    let mut burnup = burnup();
    burnup.total = None;
    let due = Some(date(2026, 3, 1));
    let forecast = forecast_burnup(&burnup, &ForecastSettings::default().with_due_date(due), now());

    assert!(forecast.velocity.is_some());
    assert_eq!(forecast.prediction.completion_date, None);
    assert_eq!(forecast.prediction.due_date, due);
}

#[test]
fn chart_without_axes_has_no_velocity() {
    let fixture = BurnupFixture {
        x_labels: String::new(),
        ..BurnupFixture::default()
    };
    let Some(ChartExtraction::Burnup(burnup)) = extract_chart(&fixture.render(), today()) else {
        panic!("expected burnup");
    };
    let forecast = forecast_burnup(&burnup, &ForecastSettings::default(), now());

    assert_eq!(forecast.velocity, None);
    assert_eq!(forecast.velocity_segment, None);
    assert_eq!(forecast.scope_at_period_end, None);
    assert_eq!(forecast.prediction.completion_date, None);
}

mod support;

use approx::assert_relative_eq;
use burnup_lens::core::DomainPoint;
use burnup_lens::forecast::{
    DEFAULT_LOOKBACK_DAYS, ProjectStart, VelocityEstimate, calculate_velocity, value_on_or_before,
};
use chrono::{NaiveDate, NaiveDateTime};
use support::date;

fn point(date: NaiveDate, value: f64) -> DomainPoint {
    DomainPoint::new(date, value).expect("finite value")
}

fn start(date: NaiveDate, value: f64) -> ProjectStart {
    ProjectStart { date, value }
}

fn noon(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(12, 0, 0).expect("noon")
}

#[test]
fn window_reaching_past_project_start_is_clamped() {
    let series = [point(date(2026, 1, 5), 10.0), point(date(2026, 1, 10), 20.0)];
    let estimate = calculate_velocity(
        &series,
        start(date(2026, 1, 1), 0.0),
        DEFAULT_LOOKBACK_DAYS,
        noon(date(2026, 1, 10)),
    )
    .expect("estimate");

    assert_relative_eq!(estimate.current_rate, 20.0 / 9.0, epsilon = 1e-12);
    assert_eq!(estimate.period_start, date(2026, 1, 1));
    assert_eq!(estimate.period_end, date(2026, 1, 10));
    assert_eq!(estimate.period_start_value, 0.0);
    assert_eq!(estimate.period_end_value, 20.0);
}

#[test]
fn window_opening_value_is_carried_forward() {
    let series = [
        point(date(2025, 12, 1), 0.0),
        point(date(2025, 12, 20), 10.0),
        point(date(2026, 1, 5), 14.0),
        point(date(2026, 1, 10), 20.0),
    ];
    let estimate = calculate_velocity(
        &series,
        start(date(2025, 12, 1), 0.0),
        7,
        noon(date(2026, 1, 10)),
    )
    .expect("estimate");

    assert_eq!(estimate.period_start, date(2026, 1, 3));
    assert_eq!(estimate.period_start_value, 10.0);
    assert_relative_eq!(estimate.current_rate, 10.0 / 7.0, epsilon = 1e-12);
}

#[test]
fn sparse_window_falls_back_to_all_time_rate() {
    let series = [point(date(2025, 12, 1), 0.0), point(date(2026, 1, 10), 20.0)];
    let estimate = calculate_velocity(
        &series,
        start(date(2025, 12, 1), 0.0),
        7,
        noon(date(2026, 1, 10)),
    )
    .expect("estimate");

    assert_eq!(estimate.period_start, date(2025, 12, 1));
    assert_relative_eq!(estimate.current_rate, 0.5, epsilon = 1e-12);
}

#[test]
fn future_observations_are_ignored() {
    let series = [
        point(date(2026, 1, 1), 0.0),
        point(date(2026, 1, 5), 8.0),
        point(date(2026, 1, 20), 50.0),
    ];
    let estimate = calculate_velocity(
        &series,
        start(date(2026, 1, 1), 0.0),
        21,
        noon(date(2026, 1, 10)),
    )
    .expect("estimate");

    assert_eq!(estimate.period_end, date(2026, 1, 5));
    assert_relative_eq!(estimate.current_rate, 2.0, epsilon = 1e-12);
}

#[test]
fn no_positive_rate_means_no_estimate() {
    let flat = [point(date(2026, 1, 1), 5.0), point(date(2026, 1, 9), 5.0)];
    assert_eq!(
        calculate_velocity(&flat, start(date(2026, 1, 1), 5.0), 21, noon(date(2026, 1, 10))),
        None
    );

    let falling = [point(date(2026, 1, 1), 9.0), point(date(2026, 1, 9), 5.0)];
    assert_eq!(
        calculate_velocity(&falling, start(date(2026, 1, 1), 9.0), 21, noon(date(2026, 1, 10))),
        None
    );

    let single = [point(date(2026, 1, 1), 9.0)];
    assert_eq!(
        calculate_velocity(&single, start(date(2026, 1, 1), 9.0), 21, noon(date(2026, 1, 10))),
        None
    );

    assert_eq!(
        calculate_velocity(&[], start(date(2026, 1, 1), 0.0), 21, noon(date(2026, 1, 10))),
        None
    );
}

#[test]
fn estimates_always_carry_their_window() {
    let series = [point(date(2026, 1, 2), 1.0), point(date(2026, 1, 8), 7.0)];
    let estimate: Option<VelocityEstimate> =
        calculate_velocity(&series, start(date(2026, 1, 2), 1.0), 3, noon(date(2026, 1, 10)));
    let estimate = estimate.expect("estimate");
    assert!(estimate.current_rate > 0.0);
    assert!(estimate.period_start < estimate.period_end);
}

#[test]
fn scope_lookup_on_or_before_date() {
    let series = [
        point(date(2026, 1, 1), 40.0),
        point(date(2026, 1, 5), 45.0),
        point(date(2026, 1, 9), 52.0),
    ];
    assert_eq!(value_on_or_before(&series, date(2026, 1, 6)), Some(45.0));
    assert_eq!(value_on_or_before(&series, date(2026, 1, 9)), Some(52.0));
    assert_eq!(value_on_or_before(&series, date(2025, 12, 1)), Some(52.0));
    assert_eq!(value_on_or_before(&[], date(2026, 1, 1)), None);
}

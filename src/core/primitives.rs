use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Parses an exact decimal literal (`"48"`, `"12.5"`, `"1,024"`) into `f64`.
pub fn parse_decimal(text: &str, field_name: &str) -> ChartResult<f64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    let value = Decimal::from_str(&cleaned).map_err(|e| {
        ChartError::InvalidData(format!("{field_name} `{text}` is not a decimal: {e}"))
    })?;
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

#[must_use]
pub fn datetime_to_unix_seconds(time: NaiveDateTime) -> f64 {
    time.and_utc().timestamp_millis() as f64 / 1000.0
}

#[must_use]
pub fn date_to_unix_seconds(date: NaiveDate) -> f64 {
    datetime_to_unix_seconds(start_of_day(date))
}

pub fn unix_seconds_to_datetime(seconds: f64) -> ChartResult<NaiveDateTime> {
    if !seconds.is_finite() {
        return Err(ChartError::InvalidData(
            "timestamp must be finite".to_owned(),
        ));
    }
    DateTime::from_timestamp_millis((seconds * 1000.0).round() as i64)
        .map(|time| time.naive_utc())
        .ok_or_else(|| ChartError::InvalidData(format!("timestamp {seconds} is out of range")))
}

/// Signed whole-day distance between two calendar dates.
#[must_use]
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Signed fractional-day distance between two instants.
#[must_use]
pub fn fractional_days_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_milliseconds() as f64 / (SECONDS_PER_DAY * 1000.0)
}

/// Adds a fractional number of days, returning `None` on overflow.
#[must_use]
pub fn add_fractional_days(time: NaiveDateTime, days: f64) -> Option<NaiveDateTime> {
    if !days.is_finite() {
        return None;
    }
    let millis = days * SECONDS_PER_DAY * 1000.0;
    if millis.abs() >= i64::MAX as f64 {
        return None;
    }
    let delta = TimeDelta::try_milliseconds(millis.round() as i64)?;
    time.checked_add_signed(delta)
}

//! Month/day label grammar.
//!
//! Two locale forms are recognised, each with an optional four-digit year:
//!
//! ```text
//! latin := month-name '.'? ws* day (','? ws* year)?        "Dec 1", "Jan 15, 2026"
//! cjk   := (year '年')? month '月' ws* day '日'? (ws* year)? "12月 1", "2026年1月15日"
//! iso   := year '-' month '-' day                           "2026-01-15"
//! ```
//!
//! Axis labels usually omit the year, so ranges are completed by
//! [`infer_date_range`].

use chrono::{Datelike, NaiveDate};

use crate::core::DateRange;

const MONTH_PREFIXES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// A parsed calendar label whose year may still be unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDay {
    /// 1-based month number.
    pub month: u32,
    pub day: u32,
    pub year: Option<i32>,
}

impl MonthDay {
    #[must_use]
    pub fn with_year(self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year.unwrap_or(year), self.month, self.day)
    }
}

struct Scanner<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.trim().chars().peekable(),
        }
    }

    fn skip_ws(&mut self) {
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.chars.peek() == Some(&expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    fn number(&mut self, max_digits: usize) -> Option<u32> {
        let mut value = 0u32;
        let mut digits = 0;
        while let Some(digit) = self.chars.peek().and_then(|c| c.to_digit(10)) {
            if digits == max_digits {
                return None;
            }
            value = value * 10 + digit;
            digits += 1;
            self.chars.next();
        }
        (digits > 0).then_some(value)
    }

    fn word(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.chars.peek().copied().filter(|c| c.is_alphabetic()) {
            word.push(c);
            self.chars.next();
        }
        word
    }

    fn year(&mut self) -> Option<i32> {
        self.number(4).filter(|y| *y >= 1000).map(|y| y as i32)
    }

    fn at_end(&mut self) -> bool {
        self.skip_ws();
        self.chars.peek().is_none()
    }
}

fn month_from_name(name: &str) -> Option<u32> {
    let lowered = name.to_lowercase();
    if lowered.chars().count() < 3 {
        return None;
    }
    MONTH_PREFIXES
        .iter()
        .position(|prefix| lowered.starts_with(prefix))
        .map(|index| index as u32 + 1)
}

fn parse_latin(text: &str) -> Option<MonthDay> {
    let mut scanner = Scanner::new(text);
    let month = month_from_name(&scanner.word())?;
    scanner.eat('.');
    scanner.skip_ws();
    let day = scanner.number(2)?;
    let mut year = None;
    if !scanner.at_end() {
        scanner.eat(',');
        scanner.skip_ws();
        year = Some(scanner.year()?);
    }
    scanner.at_end().then_some(MonthDay { month, day, year })
}

fn parse_cjk(text: &str) -> Option<MonthDay> {
    let mut scanner = Scanner::new(text);
    let first = scanner.number(4)?;
    let (mut year, month) = if scanner.eat('年') {
        let month = scanner.number(2)?;
        (Some(first as i32), month)
    } else {
        (None, first)
    };
    if !scanner.eat('月') {
        return None;
    }
    scanner.skip_ws();
    let day = scanner.number(2)?;
    scanner.eat('日');
    if !scanner.at_end() {
        if year.is_some() {
            return None;
        }
        year = Some(scanner.year()?);
    }
    scanner.at_end().then_some(MonthDay { month, day, year })
}

fn parse_iso(text: &str) -> Option<MonthDay> {
    let mut scanner = Scanner::new(text);
    let year = scanner.year()?;
    if !scanner.eat('-') {
        return None;
    }
    let month = scanner.number(2)?;
    if !scanner.eat('-') {
        return None;
    }
    let day = scanner.number(2)?;
    scanner.at_end().then_some(MonthDay {
        month,
        day,
        year: Some(year),
    })
}

/// Parses a Latin or CJK month/day label.
#[must_use]
pub fn parse_month_day(text: &str) -> Option<MonthDay> {
    let parsed = parse_latin(text).or_else(|| parse_cjk(text))?;
    ((1..=12).contains(&parsed.month) && (1..=31).contains(&parsed.day)).then_some(parsed)
}

/// Parses any supported label form into a date, filling a missing year with `default_year`.
#[must_use]
pub fn parse_calendar_date(text: &str, default_year: i32) -> Option<NaiveDate> {
    parse_iso(text)
        .or_else(|| parse_month_day(text))
        .and_then(|label| label.with_year(default_year))
}

/// Completes the years of the first and last axis labels.
///
/// The last label defaults to `current_year`. The first label defaults to the
/// last label's year, or the year before when its month is later in the year
/// than the last label's month (the range crosses New Year).
#[must_use]
pub fn infer_date_range(first: MonthDay, last: MonthDay, current_year: i32) -> Option<DateRange> {
    let end_year = last.year.unwrap_or(current_year);
    let start_year = match first.year {
        Some(year) => year,
        None if first.month > last.month => end_year - 1,
        None => end_year,
    };

    Some(DateRange::new(
        NaiveDate::from_ymd_opt(start_year, first.month, first.day)?,
        NaiveDate::from_ymd_opt(end_year, last.month, last.day)?,
    ))
}

/// Parses the first and last axis label texts into a date range.
///
/// Returns `None` when either end is unparsable.
#[must_use]
pub fn parse_date_range(first: &str, last: &str, today: NaiveDate) -> Option<DateRange> {
    infer_date_range(parse_month_day(first)?, parse_month_day(last)?, today.year())
}

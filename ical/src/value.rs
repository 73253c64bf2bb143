// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property value types: dates, date-times, durations, text and calendar
//! user addresses.

use jiff::Span;
use jiff::civil::{Date, DateTime, Time};

use crate::error::ParseError;
use crate::keyword::{KW_DATE, KW_MAILTO, KW_TZID, KW_VALUE};
use crate::syntax::ContentLine;

/// A `DATE` or `DATE-TIME` value together with its time zone reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTimeValue {
    /// A calendar date (`VALUE=DATE`), used by all-day events.
    Date(Date),
    /// A local time not bound to any time zone.
    Floating(DateTime),
    /// A UTC time, written with a trailing `Z`.
    Utc(DateTime),
    /// A local time in the time zone named by `TZID`.
    Zoned {
        /// The local date and time.
        datetime: DateTime,
        /// The `TZID` parameter value.
        tzid: String,
    },
}

impl DateTimeValue {
    /// Parses a single value, honoring `VALUE=DATE` and `TZID` on the
    /// property.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a valid date or date-time.
    pub fn from_property(prop: &ContentLine) -> Result<Self, ParseError> {
        Self::parse(prop.value.trim(), prop.param(KW_TZID), is_date(prop))
    }

    /// Parses a comma separated list, as used by `EXDATE` and `RDATE`.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the values is invalid.
    pub fn list_from_property(prop: &ContentLine) -> Result<Vec<Self>, ParseError> {
        let tzid = prop.param(KW_TZID);
        let date_only = is_date(prop);
        prop.value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Self::parse(s, tzid, date_only))
            .collect()
    }

    /// Parses a raw value. Eight characters are always a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a valid date or date-time.
    pub fn parse(value: &str, tzid: Option<&str>, date_only: bool) -> Result<Self, ParseError> {
        if date_only || value.len() == 8 {
            return parse_date(value).map(Self::Date);
        }

        let (value, utc) = match value.strip_suffix(['Z', 'z']) {
            Some(v) => (v, true),
            None => (value, false),
        };
        let datetime = parse_date_time(value)?;
        Ok(match (utc, tzid) {
            (true, _) => Self::Utc(datetime),
            (false, Some(tzid)) => Self::Zoned {
                datetime,
                tzid: tzid.to_string(),
            },
            (false, None) => Self::Floating(datetime),
        })
    }

    /// Returns the calendar date part.
    #[must_use]
    pub fn date(&self) -> Date {
        match self {
            Self::Date(d) => *d,
            Self::Floating(dt) | Self::Utc(dt) | Self::Zoned { datetime: dt, .. } => dt.date(),
        }
    }

    /// Returns the local date-time, midnight for plain dates.
    #[must_use]
    pub fn datetime(&self) -> DateTime {
        match self {
            Self::Date(d) => d.to_datetime(Time::midnight()),
            Self::Floating(dt) | Self::Utc(dt) | Self::Zoned { datetime: dt, .. } => *dt,
        }
    }

    /// Whether this is a plain date.
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }
}

fn is_date(prop: &ContentLine) -> bool {
    prop.param(KW_VALUE)
        .is_some_and(|v| v.eq_ignore_ascii_case(KW_DATE))
}

/// Parses a `DATE` value, `YYYYMMDD`.
///
/// # Errors
///
/// Returns an error if the value is malformed or not a real date.
pub fn parse_date(value: &str) -> Result<Date, ParseError> {
    let err = || ParseError::invalid("DATE", value);
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }
    let year = value.get(0..4).and_then(|s| s.parse().ok()).ok_or_else(err)?;
    let month = value.get(4..6).and_then(|s| s.parse().ok()).ok_or_else(err)?;
    let day = value.get(6..8).and_then(|s| s.parse().ok()).ok_or_else(err)?;
    Date::new(year, month, day).map_err(|_| err())
}

/// Parses a local `DATE-TIME` value without the UTC suffix,
/// `YYYYMMDDTHHMMSS`.
///
/// # Errors
///
/// Returns an error if the value is malformed or out of range.
pub fn parse_date_time(value: &str) -> Result<DateTime, ParseError> {
    let err = || ParseError::invalid("DATE-TIME", value);
    let (date, time) = value.split_once(['T', 't']).ok_or_else(err)?;
    let date = parse_date(date).map_err(|_| err())?;
    if time.len() != 6 || !time.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }
    let hour = time.get(0..2).and_then(|s| s.parse().ok()).ok_or_else(err)?;
    let minute = time.get(2..4).and_then(|s| s.parse().ok()).ok_or_else(err)?;
    // leap seconds are clamped
    let second: i8 = time.get(4..6).and_then(|s| s.parse().ok()).ok_or_else(err)?;
    let time = Time::new(hour, minute, second.min(59), 0).map_err(|_| err())?;
    Ok(date.to_datetime(time))
}

/// Parses a `DURATION` value such as `PT1H30M`, `P1D` or `-P2W`.
///
/// # Errors
///
/// Returns an error if the value is malformed.
pub fn parse_duration(value: &str) -> Result<Span, ParseError> {
    let err = || ParseError::invalid("DURATION", value);
    let trimmed = value.trim();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, trimmed.get(1..).unwrap_or_default()),
        Some(b'+') => (false, trimmed.get(1..).unwrap_or_default()),
        _ => (false, trimmed),
    };
    let rest = rest.strip_prefix(['P', 'p']).ok_or_else(err)?;

    let mut span = Span::new();
    let mut number = String::new();
    let mut in_time = false;
    let mut seen_unit = false;
    for c in rest.chars() {
        match c.to_ascii_uppercase() {
            '0'..='9' => number.push(c),
            'T' if number.is_empty() => in_time = true,
            unit => {
                let n: i64 = number.parse().map_err(|_| err())?;
                number.clear();
                seen_unit = true;
                span = match (unit, in_time) {
                    ('W', false) => span.try_weeks(n),
                    ('D', false) => span.try_days(n),
                    ('H', true) => span.try_hours(n),
                    ('M', true) => span.try_minutes(n),
                    ('S', true) => span.try_seconds(n),
                    _ => return Err(err()),
                }
                .map_err(|_| err())?;
            }
        }
    }
    if !number.is_empty() || !seen_unit {
        return Err(err());
    }

    Ok(if negative { span.negate() } else { span })
}

/// Unescapes a `TEXT` value (`\n`, `\,`, `\;`, `\\`).
#[must_use]
pub fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Extracts the email address from a `CAL-ADDRESS` value, dropping a
/// `mailto:` scheme in any letter case.
#[must_use]
pub fn cal_address(value: &str) -> String {
    let value = value.trim();
    match value.get(..KW_MAILTO.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(KW_MAILTO) => {
            value.get(KW_MAILTO.len()..).unwrap_or_default().trim().to_string()
        }
        _ => value.to_string(),
    }
}

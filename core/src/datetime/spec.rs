// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, str::FromStr, sync::OnceLock};

use jiff::Span;
use jiff::civil::Date;
use regex::Regex;

use crate::Error;

/// A date expression, either relative to today or a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSpec {
    /// A number of days from today, negative for the past.
    Offset(i64),

    /// A calendar date. Without a year the current one is used.
    Absolute {
        /// Day of month.
        day: i8,
        /// Month, 1 to 12.
        month: i8,
        /// Full year. Two-digit input is already mapped to 2000+YY.
        year: Option<i16>,
    },
}

impl DateSpec {
    /// Resolves the expression against `today`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDateFormat`] when the result is not a real
    /// calendar date or falls outside the supported range.
    pub fn resolve(&self, today: Date) -> Result<Date, Error> {
        let err = || Error::InvalidDateFormat(self.to_string());
        match *self {
            DateSpec::Offset(days) => {
                let span = Span::new().try_days(days).map_err(|_| err())?;
                today.checked_add(span).map_err(|_| err())
            }
            DateSpec::Absolute { day, month, year } => {
                Date::new(year.unwrap_or_else(|| today.year()), month, day).map_err(|_| err())
            }
        }
    }
}

impl fmt::Display for DateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateSpec::Offset(0) => write!(f, "0"),
            DateSpec::Offset(days) => write!(f, "{days:+}"),
            DateSpec::Absolute {
                day,
                month,
                year: Some(year),
            } => write!(f, "{day}.{month}.{year}"),
            DateSpec::Absolute {
                day,
                month,
                year: None,
            } => write!(f, "{day}.{month}"),
        }
    }
}

impl FromStr for DateSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        parse_offset(s)
            .or_else(|| parse_absolute(s))
            .ok_or_else(|| Error::InvalidDateFormat(s.to_string()))
    }
}

/// Resolves a date expression to a concrete date. An empty expression
/// means `today`.
///
/// # Errors
///
/// Returns [`Error::InvalidDateFormat`] if the expression is not accepted or
/// names a day that does not exist, e.g. `31.04.2025`.
pub fn resolve_date(expr: &str, today: Date) -> Result<Date, Error> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Ok(today);
    }

    expr.parse::<DateSpec>()?
        .resolve(today)
        .map_err(|_| Error::InvalidDateFormat(expr.to_string()))
}

/// Parse offsets like "0", "+1", "-7". Non-zero offsets need a sign.
fn parse_offset(s: &str) -> Option<DateSpec> {
    const RE: &str = r"^(?:0|[+-]\d{1,9})$";
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| Regex::new(RE).unwrap());
    if re.is_match(s)
        && let Ok(days) = s.parse::<i64>()
    {
        return Some(DateSpec::Offset(days));
    }

    None
}

/// Parse dates like "5.3.2025", "05.03.25", "5.3"
fn parse_absolute(s: &str) -> Option<DateSpec> {
    const RE: &str = r"^(\d{1,2})\.(\d{1,2})(?:\.(\d{4}|\d{2}))?$";
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| Regex::new(RE).unwrap());
    let captures = re.captures(s)?;

    let day = captures[1].parse::<i8>().ok()?;
    let month = captures[2].parse::<i8>().ok()?;
    let year = match captures.get(3).map(|m| m.as_str()) {
        None => None,
        Some(y) if y.len() == 2 => Some(2000 + y.parse::<i16>().ok()?),
        Some(y) => Some(y.parse::<i16>().ok()?),
    };
    Some(DateSpec::Absolute { day, month, year })
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, str::FromStr, sync::OnceLock};

use dayprint_caldav::TimeRange;
use jiff::civil::Date;
use jiff::tz::{Offset, TimeZone};
use jiff::{Timestamp, ToSpan, Zoned};
use regex::Regex;
use serde::de;

use crate::Error;

const MAX_OFFSET_SECONDS: i32 = 18 * 3600;

/// A fixed offset from UTC, applied to every day of the year alike.
///
/// Parsed from a number of hours (`+3`, `-5`, `0`, `+5.5`) or from
/// `±HH:MM`. There is no daylight saving logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcOffset(Offset);

impl UtcOffset {
    /// Creates an offset from a number of seconds east of UTC.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOffset`] when the offset exceeds 18 hours.
    pub fn from_seconds(seconds: i32) -> Result<Self, Error> {
        if seconds.abs() > MAX_OFFSET_SECONDS {
            return Err(Error::InvalidOffset(seconds.to_string()));
        }
        Offset::from_seconds(seconds)
            .map(UtcOffset)
            .map_err(|_| Error::InvalidOffset(seconds.to_string()))
    }

    /// Seconds east of UTC.
    pub fn seconds(&self) -> i32 {
        self.0.seconds()
    }

    /// The offset as a fixed time zone.
    pub fn time_zone(&self) -> TimeZone {
        TimeZone::fixed(self.0)
    }

    /// Converts an instant to local time in this offset.
    pub fn to_local(&self, ts: Timestamp) -> Zoned {
        ts.to_zoned(self.time_zone())
    }

    /// Resolves the UTC window covering the local calendar day `date`.
    ///
    /// This is the only place where a local day is turned into absolute
    /// time, so replacing the flat offset by a zone database lookup only
    /// touches this function.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDateFormat`] when the window leaves the
    /// supported time range.
    pub fn window_for(&self, date: Date) -> Result<DayWindow, Error> {
        let err = || Error::InvalidDateFormat(date.to_string());
        let start = date.to_zoned(self.time_zone()).map_err(|_| err())?;
        let start = start.timestamp();
        let end = start.checked_add(24.hours()).map_err(|_| err())?;
        Ok(DayWindow { start, end })
    }
}

impl Default for UtcOffset {
    fn default() -> Self {
        UtcOffset(Offset::constant(3))
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.seconds();
        let sign = if seconds < 0 { '-' } else { '+' };
        let minutes = seconds.abs() / 60;
        write!(f, "{sign}{:02}:{:02}", minutes / 60, minutes % 60)
    }
}

impl FromStr for UtcOffset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let seconds = parse_clock(s)
            .or_else(|| parse_hours(s))
            .ok_or_else(|| Error::InvalidOffset(s.to_string()))?;
        UtcOffset::from_seconds(seconds).map_err(|_| Error::InvalidOffset(s.to_string()))
    }
}

impl<'de> serde::Deserialize<'de> for UtcOffset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct OffsetVisitor;

        impl de::Visitor<'_> for OffsetVisitor {
            type Value = UtcOffset;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(r#"a UTC offset in hours like "+3", "-5", "+5.5" or "+05:30""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value.parse().map_err(|e: Error| E::custom(e.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                self.visit_str(&value.to_string())
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                self.visit_str(&value.to_string())
            }
        }

        deserializer.deserialize_any(OffsetVisitor)
    }
}

/// Parse "+05:30", "-4:00"
fn parse_clock(s: &str) -> Option<i32> {
    const RE: &str = r"^([+-]?)(\d{1,2}):(\d{2})$";
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| Regex::new(RE).unwrap());
    let captures = re.captures(s)?;

    let hours = captures[2].parse::<i32>().ok()?;
    let minutes = captures[3].parse::<i32>().ok().filter(|m| *m < 60)?;
    let seconds = hours * 3600 + minutes * 60;
    Some(if &captures[1] == "-" { -seconds } else { seconds })
}

/// Parse hours like "+3", "-5", "0", "+5.5", "5.75"
fn parse_hours(s: &str) -> Option<i32> {
    const RE: &str = r"^[+-]?\d{1,2}(?:\.\d{1,4})?$";
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| Regex::new(RE).unwrap());
    if !re.is_match(s) {
        return None;
    }

    let seconds = (s.parse::<f64>().ok()? * 3600.0).round();
    if seconds.abs() > f64::from(MAX_OFFSET_SECONDS) {
        return None;
    }
    Some(seconds as i32)
}

/// A half-open UTC interval `[start, end)` covering one local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    /// Local midnight.
    pub start: Timestamp,
    /// Exactly 24 hours after `start`.
    pub end: Timestamp,
}

impl DayWindow {
    /// Whether an occurrence `[start, end)` overlaps the window.
    ///
    /// A zero-length occurrence counts when it starts inside the window.
    pub fn intersects(&self, start: Timestamp, end: Timestamp) -> bool {
        if end <= start {
            self.start <= start && start < self.end
        } else {
            start < self.end && end > self.start
        }
    }
}

impl From<DayWindow> for TimeRange {
    fn from(window: DayWindow) -> Self {
        TimeRange {
            start: window.start,
            end: window.end,
        }
    }
}

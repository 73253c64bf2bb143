// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule (`RRULE`) values.

use std::fmt::{self, Display};
use std::str::FromStr;

use jiff::civil::Weekday;

use crate::error::ParseError;
use crate::keyword::{
    KW_DAY_FR, KW_DAY_MO, KW_DAY_SA, KW_DAY_SU, KW_DAY_TH, KW_DAY_TU, KW_DAY_WE, KW_RRULE_BYDAY,
    KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY, KW_RRULE_BYSETPOS, KW_RRULE_COUNT, KW_RRULE_FREQ,
    KW_RRULE_FREQ_DAILY, KW_RRULE_FREQ_HOURLY, KW_RRULE_FREQ_MINUTELY, KW_RRULE_FREQ_MONTHLY,
    KW_RRULE_FREQ_SECONDLY, KW_RRULE_FREQ_WEEKLY, KW_RRULE_FREQ_YEARLY, KW_RRULE_INTERVAL,
    KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::value::DateTimeValue;

/// Recurrence frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(missing_docs)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Secondly => write!(f, "{KW_RRULE_FREQ_SECONDLY}"),
            Frequency::Minutely => write!(f, "{KW_RRULE_FREQ_MINUTELY}"),
            Frequency::Hourly => write!(f, "{KW_RRULE_FREQ_HOURLY}"),
            Frequency::Daily => write!(f, "{KW_RRULE_FREQ_DAILY}"),
            Frequency::Weekly => write!(f, "{KW_RRULE_FREQ_WEEKLY}"),
            Frequency::Monthly => write!(f, "{KW_RRULE_FREQ_MONTHLY}"),
            Frequency::Yearly => write!(f, "{KW_RRULE_FREQ_YEARLY}"),
        }
    }
}

impl FromStr for Frequency {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            KW_RRULE_FREQ_SECONDLY => Ok(Self::Secondly),
            KW_RRULE_FREQ_MINUTELY => Ok(Self::Minutely),
            KW_RRULE_FREQ_HOURLY => Ok(Self::Hourly),
            KW_RRULE_FREQ_DAILY => Ok(Self::Daily),
            KW_RRULE_FREQ_WEEKLY => Ok(Self::Weekly),
            KW_RRULE_FREQ_MONTHLY => Ok(Self::Monthly),
            KW_RRULE_FREQ_YEARLY => Ok(Self::Yearly),
            _ => Err(ParseError::invalid("FREQ", s)),
        }
    }
}

/// Day of week with optional occurrence, e.g. `2MO` or `-1FR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayNum {
    /// Day of the week
    pub weekday: Weekday,
    /// Occurrence within the month or year, negative counts from the end.
    pub nth: Option<i8>,
}

impl FromStr for WeekdayNum {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::invalid("BYDAY", s);
        let split = s.len().checked_sub(2).ok_or_else(err)?;
        let (nth, day) = (s.get(..split).ok_or_else(err)?, s.get(split..).ok_or_else(err)?);
        let nth = match nth {
            "" => None,
            n => Some(
                n.trim_start_matches('+')
                    .parse::<i8>()
                    .ok()
                    .filter(|n| *n != 0 && (-53..=53).contains(n))
                    .ok_or_else(err)?,
            ),
        };
        Ok(Self {
            weekday: parse_weekday(day).ok_or_else(err)?,
            nth,
        })
    }
}

/// Recurrence rule
///
/// Rule parts this reader does not interpret (`BYHOUR`, `BYWEEKNO`, ...)
/// are kept by name in [`RecurrenceRule::unsupported`] so callers can
/// refuse to expand a series they would get wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    /// Frequency of recurrence
    pub freq: Frequency,
    /// Interval between recurrences, at least 1.
    pub interval: u32,
    /// Number of occurrences
    pub count: Option<u32>,
    /// Last possible start, inclusive.
    pub until: Option<DateTimeValue>,
    /// Day of week specifier
    pub by_day: Vec<WeekdayNum>,
    /// Day of month specifier
    pub by_month_day: Vec<i8>,
    /// Month specifier
    pub by_month: Vec<i8>,
    /// Position in the expanded set
    pub by_set_pos: Vec<i16>,
    /// Start day of week
    pub wkst: Weekday,
    /// Names of rule parts present but not interpreted.
    pub unsupported: Vec<String>,
}

impl FromStr for RecurrenceRule {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::invalid("RRULE", s);

        let mut freq = None;
        let mut interval = 1;
        let mut count = None;
        let mut until = None;
        let mut by_day = Vec::new();
        let mut by_month_day = Vec::new();
        let mut by_month = Vec::new();
        let mut by_set_pos = Vec::new();
        let mut wkst = Weekday::Monday;
        let mut unsupported = Vec::new();

        for part in s.trim().split(';').filter(|p| !p.is_empty()) {
            let (key, value) = part.split_once('=').ok_or_else(err)?;
            let key = key.trim().to_ascii_uppercase();
            let value = value.trim();
            match key.as_str() {
                KW_RRULE_FREQ => freq = Some(value.parse()?),
                KW_RRULE_INTERVAL => {
                    interval = value.parse().ok().filter(|n| *n > 0).ok_or_else(err)?;
                }
                KW_RRULE_COUNT => count = Some(value.parse().map_err(|_| err())?),
                KW_RRULE_UNTIL => until = Some(DateTimeValue::parse(value, None, false)?),
                KW_RRULE_BYDAY => by_day = parse_list(value)?,
                KW_RRULE_BYMONTHDAY => {
                    by_month_day = parse_numbers(value, -31, 31).ok_or_else(err)?;
                }
                KW_RRULE_BYMONTH => by_month = parse_numbers(value, 1, 12).ok_or_else(err)?,
                KW_RRULE_BYSETPOS => {
                    by_set_pos = parse_numbers(value, -366, 366).ok_or_else(err)?;
                }
                KW_RRULE_WKST => wkst = parse_weekday(value).ok_or_else(err)?,
                _ => unsupported.push(key),
            }
        }

        if count.is_some() && until.is_some() {
            return Err(err());
        }

        Ok(Self {
            freq: freq.ok_or_else(err)?,
            interval,
            count,
            until,
            by_day,
            by_month_day,
            by_month,
            by_set_pos,
            wkst,
            unsupported,
        })
    }
}

fn parse_list<T: FromStr<Err = ParseError>>(value: &str) -> Result<Vec<T>, ParseError> {
    value.split(',').map(|v| v.trim().parse()).collect()
}

fn parse_numbers<T>(value: &str, min: T, max: T) -> Option<Vec<T>>
where
    T: FromStr + PartialOrd + Default + Copy,
{
    value
        .split(',')
        .map(|v| {
            v.trim()
                .trim_start_matches('+')
                .parse::<T>()
                .ok()
                .filter(|n| *n != T::default() && *n >= min && *n <= max)
        })
        .collect()
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.to_ascii_uppercase().as_str() {
        KW_DAY_SU => Some(Weekday::Sunday),
        KW_DAY_MO => Some(Weekday::Monday),
        KW_DAY_TU => Some(Weekday::Tuesday),
        KW_DAY_WE => Some(Weekday::Wednesday),
        KW_DAY_TH => Some(Weekday::Thursday),
        KW_DAY_FR => Some(Weekday::Friday),
        KW_DAY_SA => Some(Weekday::Saturday),
        _ => None,
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence expansion.
//!
//! Expansion works on wall-clock times in the zone of `DTSTART`; turning
//! the results into instants is up to the caller. Nothing here touches
//! the network or the clock.

use dayprint_ical::{Frequency, RecurrenceRule, WeekdayNum};
use jiff::civil::{Date, DateTime, Time, Weekday};
use jiff::{SignedDuration, Span};

use crate::Error;

/// Upper bound on the number of periods walked for one series.
const MAX_PERIODS: i64 = 100_000;

/// The occurrence pattern of one event: its first start plus an optional
/// rule, extra dates and excluded dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    dtstart: DateTime,
    rule: Option<RecurrenceRule>,
    until: Option<DateTime>,
    rdates: Vec<DateTime>,
    exdates: Vec<DateTime>,
}

impl Series {
    /// A series with a single occurrence at `dtstart`.
    pub fn new(dtstart: DateTime) -> Self {
        Self {
            dtstart,
            rule: None,
            until: None,
            rdates: Vec::new(),
            exdates: Vec::new(),
        }
    }

    /// Attaches a recurrence rule. `until` is the rule's `UNTIL` already
    /// converted to the wall clock of `DTSTART`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedEvent`] for rule parts that are not
    /// expanded here, such as `BYHOUR` or `BYWEEKNO`, and for combinations
    /// that RFC 5545 forbids.
    pub fn rule(
        mut self,
        uid: &str,
        rule: RecurrenceRule,
        until: Option<DateTime>,
    ) -> Result<Self, Error> {
        if !rule.unsupported.is_empty() {
            let parts = rule.unsupported.join(", ");
            return Err(Error::malformed(
                uid,
                format!("unsupported recurrence rule parts: {parts}"),
            ));
        }

        let ordinals = rule.by_day.iter().any(|d| d.nth.is_some());
        let per_month_or_year = matches!(rule.freq, Frequency::Monthly | Frequency::Yearly);
        if ordinals && !per_month_or_year {
            return Err(Error::malformed(
                uid,
                format!("numbered BYDAY is not allowed with FREQ={}", rule.freq),
            ));
        }
        if rule.freq == Frequency::Weekly && !rule.by_month_day.is_empty() {
            return Err(Error::malformed(
                uid,
                "BYMONTHDAY is not allowed with FREQ=WEEKLY",
            ));
        }

        self.rule = Some(rule);
        self.until = until;
        Ok(self)
    }

    /// Adds `RDATE` starts.
    pub fn rdates(mut self, dates: impl IntoIterator<Item = DateTime>) -> Self {
        self.rdates.extend(dates);
        self
    }

    /// Adds `EXDATE` starts.
    pub fn exdates(mut self, dates: impl IntoIterator<Item = DateTime>) -> Self {
        self.exdates.extend(dates);
        self
    }


    /// Every occurrence start in `[from, to)`, sorted, without the excluded
    /// ones.
    pub fn starts_between(&self, from: DateTime, to: DateTime) -> Vec<DateTime> {
        let mut starts = match &self.rule {
            Some(rule) => expand(rule, self.dtstart, self.until, from, to),
            None => vec![self.dtstart],
        };
        starts.extend(self.rdates.iter().copied());
        starts.retain(|s| *s >= from && *s < to && !self.exdates.contains(s));
        starts.sort();
        starts.dedup();
        starts
    }
}

/// Walks the periods of `rule` from `dtstart` up to `to`. `DTSTART` is
/// always the first occurrence and counts towards `COUNT`.
fn expand(
    rule: &RecurrenceRule,
    dtstart: DateTime,
    until: Option<DateTime>,
    from: DateTime,
    to: DateTime,
) -> Vec<DateTime> {
    let mut out = Vec::new();
    if until.is_some_and(|u| dtstart > u) {
        return out;
    }
    out.push(dtstart);

    let mut emitted: u32 = 1;
    let first = first_period(rule, dtstart, from);
    for index in first..first.saturating_add(MAX_PERIODS) {
        let Some((period_start, candidates)) = period(rule, dtstart, index) else {
            break;
        };
        if period_start >= to || until.is_some_and(|u| period_start > u) {
            break;
        }

        for candidate in candidates {
            if candidate <= dtstart {
                continue;
            }
            if candidate >= to
                || until.is_some_and(|u| candidate > u)
                || rule.count.is_some_and(|n| emitted >= n)
            {
                return out;
            }
            out.push(candidate);
            emitted += 1;
        }
    }
    out
}

/// Index of the first period worth walking. Periods before `from` can be
/// skipped when nothing is counted and periods have a fixed length.
fn first_period(rule: &RecurrenceRule, dtstart: DateTime, from: DateTime) -> i64 {
    if rule.count.is_some() || from <= dtstart {
        return 0;
    }

    let unit = match rule.freq {
        Frequency::Secondly => 1,
        Frequency::Minutely => 60,
        Frequency::Hourly => 3600,
        Frequency::Daily => 86400,
        Frequency::Weekly | Frequency::Monthly | Frequency::Yearly => return 0,
    };
    let elapsed = from.duration_since(dtstart).as_secs();
    let step = unit * i64::from(rule.interval);
    (elapsed / step - 1).max(0)
}

/// The start of period `index` and its occurrence candidates, sorted and
/// reduced by `BYSETPOS`. `None` once the calendar range is exhausted.
fn period(
    rule: &RecurrenceRule,
    dtstart: DateTime,
    index: i64,
) -> Option<(DateTime, Vec<DateTime>)> {
    let steps = index.checked_mul(i64::from(rule.interval))?;
    let time = dtstart.time();

    let (period_start, dates) = match rule.freq {
        Frequency::Secondly | Frequency::Minutely | Frequency::Hourly => {
            let span = match rule.freq {
                Frequency::Secondly => Span::new().try_seconds(steps),
                Frequency::Minutely => Span::new().try_minutes(steps),
                _ => Span::new().try_hours(steps),
            }
            .ok()?;
            let candidate = dtstart.checked_add(span).ok()?;
            let set = if matches_day_filters(rule, candidate.date()) {
                vec![candidate]
            } else {
                Vec::new()
            };
            return Some((candidate, select_positions(set, &rule.by_set_pos)));
        }
        Frequency::Daily => {
            let date = dtstart.date().checked_add(Span::new().try_days(steps).ok()?).ok()?;
            let dates = if matches_day_filters(rule, date) {
                vec![date]
            } else {
                Vec::new()
            };
            (date, dates)
        }
        Frequency::Weekly => {
            let week = week_start(dtstart.date(), rule.wkst)
                .checked_add(Span::new().try_weeks(steps).ok()?)
                .ok()?;
            (week, week_days(rule, week, dtstart.date().weekday()))
        }
        Frequency::Monthly => {
            let month = dtstart
                .date()
                .first_of_month()
                .checked_add(Span::new().try_months(steps).ok()?)
                .ok()?;
            let dates = if rule.by_month.is_empty() || rule.by_month.contains(&month.month()) {
                month_days(rule, month, dtstart.day())
            } else {
                Vec::new()
            };
            (month, dates)
        }
        Frequency::Yearly => {
            let year = i16::try_from(i64::from(dtstart.year()).checked_add(steps)?).ok()?;
            let first = Date::new(year, 1, 1).ok()?;
            (first, year_days(rule, year, dtstart.date()))
        }
    };

    let mut set: Vec<DateTime> = dates.into_iter().map(|d| d.to_datetime(time)).collect();
    set.sort();
    set.dedup();
    Some((
        period_start.to_datetime(Time::midnight()),
        select_positions(set, &rule.by_set_pos),
    ))
}

fn matches_day_filters(rule: &RecurrenceRule, date: Date) -> bool {
    (rule.by_month.is_empty() || rule.by_month.contains(&date.month()))
        && (rule.by_month_day.is_empty()
            || rule.by_month_day.iter().any(|d| month_day(date, *d) == Some(date)))
        && weekday_allowed(rule, date)
}

fn weekday_allowed(rule: &RecurrenceRule, date: Date) -> bool {
    rule.by_day.is_empty() || rule.by_day.iter().any(|d| d.weekday == date.weekday())
}

fn week_start(date: Date, wkst: Weekday) -> Date {
    let back = i64::from(
        (date.weekday().to_monday_zero_offset() - wkst.to_monday_zero_offset()).rem_euclid(7),
    );
    date.checked_sub(Span::new().days(back)).unwrap_or(date)
}

fn week_days(rule: &RecurrenceRule, week: Date, default: Weekday) -> Vec<Date> {
    let weekdays: Vec<Weekday> = if rule.by_day.is_empty() {
        vec![default]
    } else {
        rule.by_day.iter().map(|d| d.weekday).collect()
    };

    weekdays
        .into_iter()
        .filter_map(|weekday| {
            let offset = (weekday.to_monday_zero_offset() - rule.wkst.to_monday_zero_offset())
                .rem_euclid(7);
            week.checked_add(Span::new().days(i64::from(offset))).ok()
        })
        .filter(|d| rule.by_month.is_empty() || rule.by_month.contains(&d.month()))
        .collect()
}

/// Candidate days within the month starting at `first`.
fn month_days(rule: &RecurrenceRule, first: Date, default_day: i8) -> Vec<Date> {
    if !rule.by_month_day.is_empty() {
        return rule
            .by_month_day
            .iter()
            .filter_map(|d| month_day(first, *d))
            .filter(|d| weekday_allowed(rule, *d))
            .collect();
    }

    if !rule.by_day.is_empty() {
        let last = first.last_of_month();
        return rule
            .by_day
            .iter()
            .flat_map(|d| weekdays_between(first, last, *d))
            .collect();
    }

    Date::new(first.year(), first.month(), default_day)
        .ok()
        .into_iter()
        .collect()
}

/// Candidate days within `year`.
fn year_days(rule: &RecurrenceRule, year: i16, dtstart: Date) -> Vec<Date> {
    if !rule.by_month.is_empty() {
        return days_in_months(rule, year, rule.by_month.iter().copied(), dtstart.day());
    }
    if !rule.by_month_day.is_empty() {
        return days_in_months(rule, year, 1..=12, dtstart.day());
    }
    if !rule.by_day.is_empty() {
        let (Ok(first), Ok(last)) = (Date::new(year, 1, 1), Date::new(year, 12, 31)) else {
            return Vec::new();
        };
        return rule
            .by_day
            .iter()
            .flat_map(|d| weekdays_between(first, last, *d))
            .collect();
    }

    Date::new(year, dtstart.month(), dtstart.day())
        .ok()
        .into_iter()
        .collect()
}

fn days_in_months(
    rule: &RecurrenceRule,
    year: i16,
    months: impl Iterator<Item = i8>,
    default_day: i8,
) -> Vec<Date> {
    months
        .filter_map(|m| Date::new(year, m, 1).ok())
        .flat_map(|first| month_days(rule, first, default_day))
        .collect()
}

/// Day `day` of the month containing `date`; negative counts from the end.
fn month_day(date: Date, day: i8) -> Option<Date> {
    let day = if day < 0 {
        date.days_in_month() + day + 1
    } else {
        day
    };
    Date::new(date.year(), date.month(), day).ok()
}

/// The days in `[first, last]` falling on `day.weekday`, or only the
/// `day.nth` one of them (negative counts from `last`).
fn weekdays_between(first: Date, last: Date, day: WeekdayNum) -> Vec<Date> {
    let forward = (day.weekday.to_monday_zero_offset() - first.weekday().to_monday_zero_offset())
        .rem_euclid(7);
    let backward = (last.weekday().to_monday_zero_offset()
        - day.weekday.to_monday_zero_offset())
    .rem_euclid(7);

    let nth = |base: Date, weeks: i64| base.checked_add(Span::new().try_weeks(weeks).ok()?).ok();
    match day.nth {
        None => {
            let Ok(start) = first.checked_add(Span::new().days(i64::from(forward))) else {
                return Vec::new();
            };
            start
                .series(Span::new().weeks(1))
                .take_while(|d| *d <= last)
                .collect()
        }
        Some(n) if n > 0 => first
            .checked_add(Span::new().days(i64::from(forward)))
            .ok()
            .and_then(|start| nth(start, i64::from(n) - 1))
            .filter(|d| *d <= last)
            .into_iter()
            .collect(),
        Some(n) => last
            .checked_sub(Span::new().days(i64::from(backward)))
            .ok()
            .and_then(|end| nth(end, i64::from(n) + 1))
            .filter(|d| *d >= first)
            .into_iter()
            .collect(),
    }
}

/// Applies `BYSETPOS` to a sorted set. Positions are 1-based, negative
/// from the end.
fn select_positions(set: Vec<DateTime>, positions: &[i16]) -> Vec<DateTime> {
    if positions.is_empty() {
        return set;
    }

    let mut selected: Vec<DateTime> = positions
        .iter()
        .filter_map(|p| {
            let index = if *p > 0 {
                usize::try_from(p - 1).ok()
            } else {
                set.len().checked_sub(usize::from(p.unsigned_abs()))
            };
            set.get(index?).copied()
        })
        .collect();
    selected.sort();
    selected.dedup();
    selected
}

/// Length of an occurrence, kept in whole days for all-day events so they
/// stay aligned to dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccurrenceLength {
    /// A number of calendar days.
    Days(i64),
    /// An exact duration.
    Exact(SignedDuration),
}

impl OccurrenceLength {
    /// The length as a span that can be added to a start time.
    pub fn to_span(self) -> Span {
        match self {
            OccurrenceLength::Days(days) => Span::new().try_days(days).unwrap_or_default(),
            OccurrenceLength::Exact(duration) => Span::try_from(duration).unwrap_or_default(),
        }
    }
}

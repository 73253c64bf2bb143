// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use async_trait::async_trait;
use dayprint_caldav::{CalendarCollection, DavClient, DavConfig, DavError};
use dayprint_ical::{DateTimeValue, VEvent, parse_events};
use jiff::civil::{DateTime, Time};
use jiff::tz::TimeZone;
use jiff::{SignedDuration, ToSpan, Zoned};

use crate::Error;
use crate::datetime::{DayWindow, UtcOffset};
use crate::event::{AttendeeRole, RawAttendee, RawEvent};
use crate::recurrence::{OccurrenceLength, Series};

/// A source of iCalendar data.
#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Fetches the iCalendar documents holding events that overlap
    /// `window`. Documents may contain more than the window; the caller
    /// filters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CalendarUnavailable`] when the calendar cannot be
    /// reached.
    async fn fetch(&self, window: DayWindow) -> Result<Vec<String>, Error>;
}

/// A calendar on a `CalDAV` server.
#[derive(Debug)]
pub struct CalDavCalendar {
    client: DavClient,
    selector: Option<String>,
}

impl CalDavCalendar {
    /// Creates a calendar source.
    ///
    /// `selector` picks the calendar by display name or href; without it
    /// the first calendar that holds events is used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL is invalid.
    pub fn new(config: DavConfig, selector: Option<String>) -> Result<Self, Error> {
        let client = DavClient::new(config)
            .map_err(|e| Error::Config(format!("invalid calendar settings: {e}")))?;
        Ok(Self { client, selector })
    }

    async fn select(&self) -> Result<CalendarCollection, Error> {
        let calendars = self.client.discover_calendars().await.map_err(unavailable)?;
        tracing::debug!(count = calendars.len(), "discovered calendars");

        let found = match &self.selector {
            Some(selector) => calendars.into_iter().find(|c| c.matches(selector)),
            None => calendars.into_iter().find(|c| c.supports("VEVENT")),
        };
        found.ok_or_else(|| {
            Error::CalendarUnavailable(match &self.selector {
                Some(selector) => format!("no calendar named '{selector}'"),
                None => "no calendar with events found for this user".to_string(),
            })
        })
    }
}

#[async_trait]
impl CalendarSource for CalDavCalendar {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, window: DayWindow) -> Result<Vec<String>, Error> {
        let calendar = self.select().await?;
        tracing::debug!(href = %calendar.href.as_str(), "using calendar");

        let objects = self
            .client
            .query_events(&calendar.href, window.into())
            .await
            .map_err(unavailable)?;
        tracing::info!(count = objects.len(), "fetched calendar objects");
        Ok(objects.into_iter().map(|o| o.data).collect())
    }
}

fn unavailable(e: DavError) -> Error {
    Error::CalendarUnavailable(e.to_string())
}

/// Fetches the occurrences overlapping `window`, sorted by start time and
/// then subject. Times are expressed in `offset`.
///
/// # Errors
///
/// Returns [`Error::CalendarUnavailable`] if the source fails. Malformed
/// events are skipped with a warning.
pub async fn fetch_events(
    source: &dyn CalendarSource,
    window: DayWindow,
    offset: UtcOffset,
) -> Result<Vec<RawEvent>, Error> {
    let documents = source.fetch(window).await?;
    Ok(events_in_window(&documents, window, offset))
}

/// Materializes the occurrences overlapping `window` from iCalendar
/// documents.
///
/// Events sharing a `UID` form one series: the master is expanded, an
/// instance with a matching `RECURRENCE-ID` replaces the generated one,
/// and a cancelled instance removes it. Floating times, dates and unknown
/// `TZID`s are read in `offset`.
pub fn events_in_window<S: AsRef<str>>(
    documents: &[S],
    window: DayWindow,
    offset: UtcOffset,
) -> Vec<RawEvent> {
    let mut groups: Vec<Vec<VEvent>> = Vec::new();
    let mut by_uid: HashMap<String, usize> = HashMap::new();
    for document in documents {
        let events = match parse_events(document.as_ref()) {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable calendar object");
                continue;
            }
        };

        for event in events {
            let event = match event {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed event");
                    continue;
                }
            };
            match by_uid.get(&event.uid).and_then(|&i| groups.get_mut(i)) {
                Some(group) if !event.uid.is_empty() => group.push(event),
                _ => {
                    by_uid.insert(event.uid.clone(), groups.len());
                    groups.push(vec![event]);
                }
            }
        }
    }

    let mut out = Vec::new();
    for group in groups {
        materialize(&group, window, offset, &mut out);
    }
    out.sort_by(|a, b| {
        a.start
            .timestamp()
            .cmp(&b.start.timestamp())
            .then_with(|| a.subject.cmp(&b.subject))
            .then_with(|| a.uid.cmp(&b.uid))
    });
    out
}

fn materialize(group: &[VEvent], window: DayWindow, offset: UtcOffset, out: &mut Vec<RawEvent>) {
    let (overrides, masters): (Vec<&VEvent>, Vec<&VEvent>) =
        group.iter().partition(|e| e.recurrence_id.is_some());
    let replaced: Vec<&DateTimeValue> = overrides
        .iter()
        .filter_map(|e| e.recurrence_id.as_ref())
        .collect();

    for master in masters {
        if master.is_cancelled() {
            tracing::debug!(uid = %master.uid, "skipping cancelled event");
            continue;
        }
        if let Err(e) = occurrences(master, true, &replaced, window, offset, out) {
            tracing::warn!(error = %e, "skipping event");
        }
    }

    for instance in overrides {
        if instance.is_cancelled() {
            tracing::debug!(uid = %instance.uid, "dropping cancelled occurrence");
            continue;
        }
        if let Err(e) = occurrences(instance, false, &[], window, offset, out) {
            tracing::warn!(error = %e, "skipping event");
        }
    }
}

/// Pushes the occurrences of `event` overlapping `window`. Starts listed in
/// `replaced` are left to their overriding instances.
fn occurrences(
    event: &VEvent,
    recurring: bool,
    replaced: &[&DateTimeValue],
    window: DayWindow,
    offset: UtcOffset,
    out: &mut Vec<RawEvent>,
) -> Result<(), Error> {
    let malformed = |e: &dyn std::fmt::Display| Error::malformed(&event.uid, e);
    let zone = zone_of(&event.dtstart, offset);
    let length = occurrence_length(event, offset)?;
    let span = length.to_span();

    let dtstart = wall_clock(&event.dtstart, &zone, offset).map_err(|e| malformed(&e))?;
    let mut series = Series::new(dtstart);
    if recurring {
        if let Some(rule) = event.recurrence_rule().map_err(|e| malformed(&e))? {
            let until = match &rule.until {
                Some(until) => {
                    Some(until_wall_clock(until, &zone, offset).map_err(|e| malformed(&e))?)
                }
                None => None,
            };
            series = series.rule(&event.uid, rule, until)?;
        }
        let rdates = wall_clocks(&event.rdates, &zone, offset).map_err(|e| malformed(&e))?;
        let exdates = wall_clocks(&event.exdates, &zone, offset).map_err(|e| malformed(&e))?;
        series = series.rdates(rdates).exdates(exdates);
    }
    let replaced: Vec<DateTime> = replaced
        .iter()
        .filter_map(|r| wall_clock(r, &zone, offset).ok())
        .collect();

    let from = window
        .start
        .to_zoned(zone.clone())
        .datetime()
        .checked_sub(span)
        .and_then(|dt| dt.checked_sub(1.day()))
        .map_err(|e| malformed(&e))?;
    let to = window
        .end
        .to_zoned(zone.clone())
        .datetime()
        .checked_add(1.day())
        .map_err(|e| malformed(&e))?;

    for start in series.starts_between(from, to) {
        if replaced.contains(&start) {
            continue;
        }
        let start = start.to_zoned(zone.clone()).map_err(|e| malformed(&e))?;
        let end = start.checked_add(span).map_err(|e| malformed(&e))?;
        if window.intersects(start.timestamp(), end.timestamp()) {
            out.push(raw_event(event, &start, &end, offset));
        }
    }
    Ok(())
}

fn raw_event(event: &VEvent, start: &Zoned, end: &Zoned, offset: UtcOffset) -> RawEvent {
    RawEvent {
        uid: event.uid.clone(),
        start: start.with_time_zone(offset.time_zone()),
        end: end.with_time_zone(offset.time_zone()),
        all_day: event.dtstart.is_date(),
        subject: event.summary.clone().unwrap_or_default(),
        location: event.location.clone().unwrap_or_default(),
        organizer: event.organizer.clone().filter(|o| !o.is_empty()),
        attendees: event
            .attendees
            .iter()
            .map(|a| RawAttendee {
                email: a.address.clone(),
                role: AttendeeRole::from_token(a.role.as_deref()),
                status: a.partstat.clone(),
            })
            .collect(),
    }
}

/// The zone `DTSTART` is expressed in, used for the recurrence wall clock.
fn zone_of(value: &DateTimeValue, offset: UtcOffset) -> TimeZone {
    match value {
        DateTimeValue::Utc(_) => TimeZone::UTC,
        DateTimeValue::Zoned { tzid, .. } => TimeZone::get(tzid).unwrap_or_else(|_| {
            tracing::debug!(%tzid, "unknown time zone, using the configured offset");
            offset.time_zone()
        }),
        DateTimeValue::Date(_) | DateTimeValue::Floating(_) => offset.time_zone(),
    }
}

/// The instant a value denotes, reading dates and floating times in
/// `offset`.
fn instant(value: &DateTimeValue, offset: UtcOffset) -> Result<Zoned, jiff::Error> {
    value.datetime().to_zoned(zone_of(value, offset))
}

/// The value as wall-clock time in `zone`. Dates and floating times have
/// no zone of their own and are taken as they are.
fn wall_clock(
    value: &DateTimeValue,
    zone: &TimeZone,
    offset: UtcOffset,
) -> Result<DateTime, jiff::Error> {
    match value {
        DateTimeValue::Date(_) | DateTimeValue::Floating(_) => Ok(value.datetime()),
        DateTimeValue::Utc(_) | DateTimeValue::Zoned { .. } => {
            instant(value, offset).map(|z| z.with_time_zone(zone.clone()).datetime())
        }
    }
}

fn wall_clocks(
    values: &[DateTimeValue],
    zone: &TimeZone,
    offset: UtcOffset,
) -> Result<Vec<DateTime>, jiff::Error> {
    values.iter().map(|v| wall_clock(v, zone, offset)).collect()
}

/// `UNTIL` is inclusive; a date bound on a timed series covers that whole
/// day.
fn until_wall_clock(
    until: &DateTimeValue,
    zone: &TimeZone,
    offset: UtcOffset,
) -> Result<DateTime, jiff::Error> {
    match until {
        DateTimeValue::Date(date) => Ok(date.to_datetime(Time::MAX)),
        _ => wall_clock(until, zone, offset),
    }
}

/// How long each occurrence lasts: `DTEND` minus `DTSTART`, else
/// `DURATION`, else one day for all-day events and nothing for timed ones.
fn occurrence_length(event: &VEvent, offset: UtcOffset) -> Result<OccurrenceLength, Error> {
    let malformed = |e: jiff::Error| Error::malformed(&event.uid, e);

    if event.dtstart.is_date() {
        let days = match (&event.dtend, event.duration) {
            (Some(end), _) => i64::from(
                event
                    .dtstart
                    .date()
                    .until(end.date())
                    .map_err(malformed)?
                    .get_days(),
            ),
            (None, Some(span)) => i64::from(span.get_weeks()) * 7 + i64::from(span.get_days()),
            (None, None) => 1,
        };
        return Ok(OccurrenceLength::Days(days.max(0)));
    }

    let start = instant(&event.dtstart, offset).map_err(malformed)?;
    let end = match (&event.dtend, event.duration) {
        (Some(end), _) => instant(end, offset).map_err(malformed)?,
        (None, Some(span)) => start.checked_add(span).map_err(malformed)?,
        (None, None) => start.clone(),
    };
    let duration = end.timestamp().duration_since(start.timestamp());
    Ok(OccurrenceLength::Exact(duration.max(SignedDuration::ZERO)))
}

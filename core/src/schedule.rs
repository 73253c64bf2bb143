// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::Date;
use jiff::{SignedDuration, Zoned};

use crate::attendee::resolve_attendees;
use crate::calendar::{CalDavCalendar, CalendarSource, fetch_events};
use crate::config::Config;
use crate::datetime::{UtcOffset, resolve_date};
use crate::directory::{CardDavDirectory, Directory, NoDirectory};
use crate::event::{RawEvent, ResolvedAttendee};
use crate::exclusion::ExclusionSet;
use crate::Error;

/// One meeting on the schedule, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    /// `HH:MM - HH:MM`, or `All day`.
    pub time_range: String,
    pub start: Zoned,
    pub end: Zoned,
    pub all_day: bool,
    /// Such as `1 h 30 min`; absent for all-day rows.
    pub duration: Option<String>,
    pub subject: String,
    pub location: String,
    /// Required attendees first, then optional ones.
    pub attendees: Vec<ResolvedAttendee>,
}

impl ScheduleRow {
    fn new(event: RawEvent, attendees: Vec<ResolvedAttendee>) -> Self {
        let (time_range, duration) = if event.all_day {
            ("All day".to_string(), None)
        } else {
            let range = format!(
                "{} - {}",
                event.start.strftime("%H:%M"),
                event.end.strftime("%H:%M")
            );
            let length = event
                .end
                .timestamp()
                .duration_since(event.start.timestamp());
            (range, Some(format_duration(length)))
        };

        Self {
            time_range,
            start: event.start,
            end: event.end,
            all_day: event.all_day,
            duration,
            subject: event.subject,
            location: event.location,
            attendees,
        }
    }

    /// The time range with the duration below it.
    pub fn time_cell(&self) -> String {
        match &self.duration {
            Some(duration) => format!("{}\n({duration})", self.time_range),
            None => self.time_range.clone(),
        }
    }

    pub fn required_attendees(&self) -> impl Iterator<Item = &ResolvedAttendee> {
        self.attendees.iter().filter(|a| !a.is_optional())
    }

    pub fn optional_attendees(&self) -> impl Iterator<Item = &ResolvedAttendee> {
        self.attendees.iter().filter(|a| a.is_optional())
    }
}

/// The meetings of one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub date: Date,
    pub rows: Vec<ScheduleRow>,
}

impl Schedule {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds the schedule of one day from a calendar, a directory and the
/// list of excluded addresses.
pub struct ScheduleBuilder {
    calendar: Box<dyn CalendarSource>,
    directory: Box<dyn Directory>,
    exclusions: ExclusionSet,
    offset: UtcOffset,
}

impl std::fmt::Debug for ScheduleBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleBuilder")
            .field("exclusions", &self.exclusions.len())
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

impl ScheduleBuilder {
    /// A builder without directory and exclusions.
    pub fn new(calendar: impl CalendarSource + 'static, offset: UtcOffset) -> Self {
        Self {
            calendar: Box::new(calendar),
            directory: Box::new(NoDirectory),
            exclusions: ExclusionSet::default(),
            offset,
        }
    }

    pub fn directory(mut self, directory: impl Directory + 'static) -> Self {
        self.directory = Box::new(directory);
        self
    }

    pub fn exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Wires up the `CalDAV` calendar, the optional `CardDAV` directory and
    /// the meeting room list. An unreadable room list is logged and treated
    /// as empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the settings are incomplete or invalid.
    pub async fn from_config(config: &Config) -> Result<Self, Error> {
        config.validate()?;

        let calendar =
            CalDavCalendar::new(config.calendar_dav(), config.calendar.calendar.clone())?;
        let mut builder = Self::new(calendar, config.utc_offset);
        if let Some(dav) = config.directory_dav() {
            builder = builder.directory(CardDavDirectory::new(dav)?);
        }

        let exclusions = match ExclusionSet::load(&config.meeting_rooms_file).await {
            Ok(set) => set,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring meeting room list");
                ExclusionSet::default()
            }
        };
        Ok(builder.exclusions(exclusions))
    }

    /// Builds the schedule for the day `date_expr` names, relative to
    /// `today`. The date is checked before anything is fetched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDateFormat`] for a bad expression and
    /// [`Error::CalendarUnavailable`] if the calendar cannot be fetched.
    /// Broken events and failed name lookups only degrade the result.
    #[tracing::instrument(skip(self, today))]
    pub async fn build(&self, date_expr: &str, today: Date) -> Result<Schedule, Error> {
        let date = resolve_date(date_expr, today)?;
        let window = self.offset.window_for(date)?;
        tracing::info!(%date, offset = %self.offset, "building schedule");

        let events = fetch_events(self.calendar.as_ref(), window, self.offset).await?;
        tracing::debug!(count = events.len(), "events in window");

        let mut rows = Vec::with_capacity(events.len());
        for event in events {
            let attendees = resolve_attendees(
                &event.attendees,
                event.organizer.as_deref(),
                &self.exclusions,
                self.directory.as_ref(),
            )
            .await;
            rows.push(ScheduleRow::new(event, attendees));
        }
        Ok(Schedule { date, rows })
    }
}

/// `1 h 30 min`, `1 h`, `30 min` or `0 min`. Seconds are dropped.
fn format_duration(duration: SignedDuration) -> String {
    let minutes = duration.as_secs().max(0) / 60;
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h} h"),
        (h, m) => format!("{h} h {m} min"),
    }
}

#[cfg(test)]
mod tests {
    use jiff::tz::TimeZone;

    use super::*;
    use crate::event::AttendeeRole;
    use crate::event::AttendeeStatus;

    #[test]
    fn test_format_duration() {
        let cases = [
            (0, "0 min"),
            (59, "0 min"),
            (60, "1 min"),
            (30 * 60, "30 min"),
            (60 * 60, "1 h"),
            (90 * 60, "1 h 30 min"),
            (25 * 60 * 60 + 60, "25 h 1 min"),
            (-60, "0 min"),
        ];
        for (secs, expected) in cases {
            assert_eq!(
                format_duration(SignedDuration::from_secs(secs)),
                expected,
                "{secs}"
            );
        }
    }

    fn event(start: &str, end: &str, all_day: bool) -> RawEvent {
        let tz = TimeZone::fixed(jiff::tz::offset(3));
        let at = |s: &str| {
            s.parse::<jiff::civil::DateTime>()
                .unwrap()
                .to_zoned(tz.clone())
                .unwrap()
        };
        RawEvent {
            uid: "1".to_string(),
            start: at(start),
            end: at(end),
            all_day,
            subject: "Review".to_string(),
            location: String::new(),
            organizer: None,
            attendees: Vec::new(),
        }
    }

    #[test]
    fn test_row_time_range() {
        let row = ScheduleRow::new(
            event("2025-03-10T10:00", "2025-03-10T11:30", false),
            Vec::new(),
        );
        assert_eq!(row.time_range, "10:00 - 11:30");
        assert_eq!(row.duration.as_deref(), Some("1 h 30 min"));
        assert_eq!(row.time_cell(), "10:00 - 11:30\n(1 h 30 min)");

        let row = ScheduleRow::new(
            event("2025-03-10T00:00", "2025-03-11T00:00", true),
            Vec::new(),
        );
        assert_eq!(row.time_range, "All day");
        assert_eq!(row.duration, None);
        assert_eq!(row.time_cell(), "All day");
    }

    #[test]
    fn test_row_attendee_groups() {
        let attendee = |email: &str, role| ResolvedAttendee {
            email: email.to_string(),
            name: None,
            role,
            status: AttendeeStatus::NeedsAction,
        };
        let row = ScheduleRow::new(
            event("2025-03-10T10:00", "2025-03-10T10:00", false),
            vec![
                attendee("a@x.com", AttendeeRole::Required),
                attendee("b@x.com", AttendeeRole::Optional),
            ],
        );
        let required: Vec<_> = row.required_attendees().map(|a| a.email.as_str()).collect();
        let optional: Vec<_> = row.optional_attendees().map(|a| a.email.as_str()).collect();
        assert_eq!(required, ["a@x.com"]);
        assert_eq!(optional, ["b@x.com"]);
        assert_eq!(row.duration.as_deref(), Some("0 min"));
    }
}

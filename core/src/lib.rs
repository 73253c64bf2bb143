// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod attendee;
mod calendar;
mod config;
mod datetime;
mod directory;
mod error;
mod event;
mod exclusion;
mod recurrence;
mod schedule;

pub use crate::attendee::resolve_attendees;
pub use crate::calendar::{CalDavCalendar, CalendarSource, events_in_window, fetch_events};
pub use crate::config::{
    APP_NAME, CalendarConfig, Config, DirectoryConfig, default_meeting_rooms_file,
    default_timeout,
};
pub use crate::datetime::{DateSpec, DayWindow, UtcOffset, resolve_date};
pub use crate::directory::{CardDavDirectory, Directory, NoDirectory};
pub use crate::error::Error;
pub use crate::event::{AttendeeRole, AttendeeStatus, RawAttendee, RawEvent, ResolvedAttendee};
pub use crate::exclusion::ExclusionSet;
pub use crate::recurrence::{OccurrenceLength, Series};
pub use crate::schedule::{Schedule, ScheduleBuilder, ScheduleRow};
pub use dayprint_caldav::{AuthMethod, DavConfig};

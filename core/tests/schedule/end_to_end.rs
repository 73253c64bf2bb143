// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Whole schedules built from a single calendar fetch.

use std::sync::atomic::Ordering;

use dayprint_core::{
    AttendeeRole, AttendeeStatus, Error, ExclusionSet, NoDirectory, ScheduleBuilder, UtcOffset,
};
use jiff::civil::date;

use crate::common::{FakeCalendar, calendar, today, vevent};

#[tokio::test]
async fn single_meeting_end_to_end() {
    // Arrange
    let doc = calendar(&[vevent(&[
        "UID:standup-1",
        "SUMMARY:Standup",
        "LOCATION:Room 1",
        "DTSTART:20250310T070000Z",
        "DTEND:20250310T073000Z",
        "ORGANIZER;CN=Alice:mailto:a@x.com",
        "ATTENDEE;ROLE=CHAIR;PARTSTAT=ACCEPTED:mailto:A@X.com",
        "ATTENDEE;ROLE=REQ-PARTICIPANT;PARTSTAT=ACCEPTED:mailto:b@x.com",
        "ATTENDEE;ROLE=OPT-PARTICIPANT:mailto:c@x.com",
    ])]);
    let builder = ScheduleBuilder::new(FakeCalendar::new(vec![doc]), UtcOffset::default())
        .directory(NoDirectory);

    // Act
    let schedule = builder.build("0", today()).await.unwrap();

    // Assert
    assert_eq!(schedule.date, today());
    assert_eq!(schedule.rows.len(), 1);
    let row = &schedule.rows[0];
    assert_eq!(row.time_range, "10:00 - 10:30");
    assert_eq!(row.duration.as_deref(), Some("30 min"));
    assert_eq!(row.subject, "Standup");
    assert_eq!(row.location, "Room 1");

    let attendees: Vec<_> = row
        .attendees
        .iter()
        .map(|a| (a.display(), a.status, a.role))
        .collect();
    assert_eq!(
        attendees,
        [
            ("b@x.com", AttendeeStatus::Accepted, AttendeeRole::Required),
            ("c@x.com", AttendeeStatus::NeedsAction, AttendeeRole::Optional),
        ]
    );
}

#[tokio::test]
async fn invalid_date_is_rejected_before_fetching() {
    // Arrange
    let source = FakeCalendar::new(Vec::new());
    let calls = source.calls();
    let builder = ScheduleBuilder::new(source, UtcOffset::default());

    for expr in ["31.04.2025", "abc", "5", "1.13"] {
        // Act
        let err = builder.build(expr, today()).await.unwrap_err();

        // Assert
        assert!(
            matches!(&err, Error::InvalidDateFormat(e) if e == expr),
            "{expr}: {err}"
        );
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unavailable_calendar_aborts() {
    let builder = ScheduleBuilder::new(
        FakeCalendar::failing("401 Unauthorized"),
        UtcOffset::default(),
    );

    let err = builder.build("", today()).await.unwrap_err();

    assert!(matches!(err, Error::CalendarUnavailable(_)));
    assert!(err.to_string().contains("401 Unauthorized"), "{err}");
}

#[tokio::test]
async fn excluded_attendees_keep_the_row() {
    // Arrange
    let doc = calendar(&[vevent(&[
        "UID:room-only",
        "SUMMARY:Room booking",
        "DTSTART:20250310T090000Z",
        "DTEND:20250310T100000Z",
        "ORGANIZER:mailto:a@x.com",
        "ATTENDEE;CUTYPE=ROOM:mailto:Room-1@x.com",
    ])]);
    let builder = ScheduleBuilder::new(FakeCalendar::new(vec![doc]), UtcOffset::default())
        .exclusions(ExclusionSet::new(["room-1@x.com"]));

    // Act
    let schedule = builder.build("0", today()).await.unwrap();

    // Assert
    assert_eq!(schedule.rows.len(), 1);
    assert!(schedule.rows[0].attendees.is_empty());
    assert_eq!(schedule.rows[0].duration.as_deref(), Some("1 h"));
}

#[tokio::test]
async fn relative_and_absolute_dates_pick_the_day() {
    // Arrange
    let doc = calendar(&[
        vevent(&[
            "UID:yesterday",
            "SUMMARY:Retro",
            "DTSTART:20250309T120000Z",
            "DTEND:20250309T130000Z",
        ]),
        vevent(&[
            "UID:next-week",
            "SUMMARY:Planning",
            "DTSTART:20250317T120000Z",
            "DTEND:20250317T140000Z",
        ]),
    ]);
    let builder = ScheduleBuilder::new(FakeCalendar::new(vec![doc]), UtcOffset::default());

    // Act & Assert
    let schedule = builder.build("-1", today()).await.unwrap();
    assert_eq!(schedule.date, date(2025, 3, 9));
    assert_eq!(schedule.rows.len(), 1);
    assert_eq!(schedule.rows[0].subject, "Retro");

    for expr in ["+7", "17.3", "17.03.25", "17.3.2025"] {
        let schedule = builder.build(expr, today()).await.unwrap();
        assert_eq!(schedule.date, date(2025, 3, 17), "{expr}");
        assert_eq!(schedule.rows.len(), 1, "{expr}");
        assert_eq!(schedule.rows[0].time_range, "15:00 - 17:00");
        assert_eq!(schedule.rows[0].duration.as_deref(), Some("2 h"));
    }

    let schedule = builder.build("+1", today()).await.unwrap();
    assert!(schedule.is_empty());
}

#[tokio::test]
async fn rows_sorted_and_broken_events_skipped() {
    // Arrange
    let doc = calendar(&[
        vevent(&["UID:3", "SUMMARY:Zeta", "DTSTART:20250310T090000Z"]),
        vevent(&["UID:2", "SUMMARY:Alpha", "DTSTART:20250310T090000Z"]),
        vevent(&["UID:1", "DTSTART:20250310T060000Z", "DURATION:PT45M"]),
        vevent(&["UID:broken", "SUMMARY:No start"]),
        vevent(&[
            "UID:day",
            "SUMMARY:Conference",
            "DTSTART;VALUE=DATE:20250310",
            "DTEND;VALUE=DATE:20250311",
        ]),
    ]);
    let builder = ScheduleBuilder::new(FakeCalendar::new(vec![doc]), UtcOffset::default());

    // Act
    let schedule = builder.build("", today()).await.unwrap();

    // Assert
    let rows: Vec<_> = schedule
        .rows
        .iter()
        .map(|r| (r.time_range.as_str(), r.subject.as_str()))
        .collect();
    assert_eq!(
        rows,
        [
            ("All day", "Conference"),
            ("09:00 - 09:45", ""),
            ("12:00 - 12:00", "Alpha"),
            ("12:00 - 12:00", "Zeta"),
        ]
    );
    assert_eq!(schedule.rows[0].duration, None);
    assert_eq!(schedule.rows[2].duration.as_deref(), Some("0 min"));
}

#[tokio::test]
async fn fractional_offset_shifts_the_window() {
    // Arrange
    let doc = calendar(&[vevent(&[
        "UID:late",
        "SUMMARY:Late call",
        "DTSTART:20250310T190000Z",
        "DTEND:20250310T200000Z",
    ])]);
    let offset: UtcOffset = "+5.5".parse().unwrap();
    let builder = ScheduleBuilder::new(FakeCalendar::new(vec![doc]), offset);

    // Act
    let today_rows = builder.build("0", today()).await.unwrap();
    let tomorrow_rows = builder.build("+1", today()).await.unwrap();

    // Assert
    assert!(today_rows.is_empty());
    assert_eq!(tomorrow_rows.rows.len(), 1);
    assert_eq!(tomorrow_rows.rows[0].time_range, "00:30 - 01:30");
}

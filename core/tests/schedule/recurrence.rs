// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurring series on the schedule.

use dayprint_core::{ScheduleBuilder, UtcOffset};
use jiff::ToSpan;

use crate::common::{FakeCalendar, calendar, today, vevent};

fn builder(events: &[String]) -> ScheduleBuilder {
    ScheduleBuilder::new(FakeCalendar::new(vec![calendar(events)]), UtcOffset::default())
}

#[tokio::test]
async fn daily_series_once_per_day() {
    // Arrange
    let builder = builder(&[vevent(&[
        "UID:daily",
        "SUMMARY:Standup",
        "DTSTART:20250201T063000Z",
        "DTEND:20250201T064500Z",
        "RRULE:FREQ=DAILY",
    ])]);

    for offset in -30_i64..=30 {
        // Act
        let expr = if offset == 0 {
            "0".to_string()
        } else {
            format!("{offset:+}")
        };
        let schedule = builder.build(&expr, today()).await.unwrap();

        // Assert
        let day = today().checked_add(offset.days()).unwrap();
        assert_eq!(schedule.date, day, "{expr}");
        if day < jiff::civil::date(2025, 2, 1) {
            assert!(schedule.is_empty(), "{expr}");
            continue;
        }
        assert_eq!(schedule.rows.len(), 1, "{expr}");
        let row = &schedule.rows[0];
        assert_eq!(row.start.date(), day);
        assert_eq!(row.end.date(), day);
        assert_eq!(row.time_range, "09:30 - 09:45");
        assert_eq!(row.duration.as_deref(), Some("15 min"));
    }
}

#[tokio::test]
async fn weekly_series_with_exceptions() {
    // Arrange
    let builder = builder(&[
        vevent(&[
            "UID:weekly",
            "SUMMARY:Sync",
            "DTSTART;TZID=Europe/Moscow:20250303T140000",
            "DTEND;TZID=Europe/Moscow:20250303T150000",
            "RRULE:FREQ=WEEKLY;BYDAY=MO,WE;UNTIL=20250331T235959Z",
            "EXDATE;TZID=Europe/Moscow:20250312T140000",
        ]),
        vevent(&[
            "UID:weekly",
            "SUMMARY:Sync (moved)",
            "RECURRENCE-ID;TZID=Europe/Moscow:20250317T140000",
            "DTSTART;TZID=Europe/Moscow:20250318T100000",
            "DTEND;TZID=Europe/Moscow:20250318T103000",
        ]),
        vevent(&[
            "UID:weekly",
            "STATUS:CANCELLED",
            "RECURRENCE-ID;TZID=Europe/Moscow:20250319T140000",
            "DTSTART;TZID=Europe/Moscow:20250319T140000",
            "DTEND;TZID=Europe/Moscow:20250319T150000",
        ]),
    ]);

    let cases = [
        ("10.3", Some(("14:00 - 15:00", "Sync"))),
        ("11.3", None),
        ("12.3", None),
        ("17.3", None),
        ("18.3", Some(("10:00 - 10:30", "Sync (moved)"))),
        ("19.3", None),
        ("24.3", Some(("14:00 - 15:00", "Sync"))),
        ("2.4", None),
    ];
    for (expr, expected) in cases {
        // Act
        let schedule = builder.build(expr, today()).await.unwrap();

        // Assert
        let rows: Vec<_> = schedule
            .rows
            .iter()
            .map(|r| (r.time_range.as_str(), r.subject.as_str()))
            .collect();
        assert_eq!(rows, expected.into_iter().collect::<Vec<_>>(), "{expr}");
    }
}

#[tokio::test]
async fn occurrence_across_midnight_listed_on_both_days() {
    // Arrange
    let builder = builder(&[vevent(&[
        "UID:night",
        "SUMMARY:Deploy",
        "DTSTART:20250303T200000Z",
        "DURATION:PT4H",
        "RRULE:FREQ=WEEKLY;COUNT=3",
    ])]);

    // Act & Assert
    for expr in ["3.3", "4.3", "10.3", "11.3", "17.3", "18.3"] {
        let schedule = builder.build(expr, today()).await.unwrap();
        assert_eq!(schedule.rows.len(), 1, "{expr}");
        assert_eq!(schedule.rows[0].time_range, "23:00 - 03:00");
        assert_eq!(schedule.rows[0].duration.as_deref(), Some("4 h"));
    }
    for expr in ["24.3", "25.3"] {
        let schedule = builder.build(expr, today()).await.unwrap();
        assert!(schedule.is_empty(), "{expr}");
    }
}

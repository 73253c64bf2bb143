// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Attendee filtering and naming as seen on the schedule.

use std::sync::atomic::Ordering;

use dayprint_core::{AttendeeStatus, ExclusionSet, ScheduleBuilder, ScheduleRow, UtcOffset};

use crate::common::{FakeCalendar, FakeDirectory, calendar, today, vevent};

fn meeting(attendees: &[&str]) -> String {
    let mut lines = vec![
        "UID:meeting",
        "SUMMARY:Design review",
        "DTSTART:20250310T080000Z",
        "DTEND:20250310T090000Z",
        "ORGANIZER:mailto:boss@x.com",
    ];
    lines.extend_from_slice(attendees);
    calendar(&[vevent(&lines)])
}

async fn single_row(builder: ScheduleBuilder) -> ScheduleRow {
    let mut schedule = builder.build("0", today()).await.unwrap();
    assert_eq!(schedule.rows.len(), 1);
    schedule.rows.remove(0)
}

fn emails(row: &ScheduleRow) -> Vec<&str> {
    row.attendees.iter().map(|a| a.email.as_str()).collect()
}

#[tokio::test]
async fn organizer_never_listed() {
    for listed in ["boss@x.com", "BOSS@X.COM", "Boss@x.com"] {
        // Arrange
        let line = format!("ATTENDEE;PARTSTAT=ACCEPTED:mailto:{listed}");
        let doc = meeting(&[&line, "ATTENDEE:mailto:dev@x.com"]);
        let builder = ScheduleBuilder::new(FakeCalendar::new(vec![doc]), UtcOffset::default());

        // Act
        let row = single_row(builder).await;

        // Assert
        assert_eq!(emails(&row), ["dev@x.com"], "{listed}");
    }
}

#[tokio::test]
async fn excluded_resources_never_listed() {
    // Arrange
    let doc = meeting(&[
        "ATTENDEE;ROLE=REQ-PARTICIPANT:mailto:ROOM-A@x.com",
        "ATTENDEE;ROLE=OPT-PARTICIPANT:mailto:room-b@x.com",
        "ATTENDEE;ROLE=NON-PARTICIPANT:mailto:projector@x.com",
        "ATTENDEE:mailto:dev@x.com",
    ]);
    let rooms = ExclusionSet::parse("room-a@x.com\nRoom-B@x.com\n# gear\nprojector@x.com\n");
    let builder = ScheduleBuilder::new(FakeCalendar::new(vec![doc]), UtcOffset::default())
        .exclusions(rooms);

    // Act
    let row = single_row(builder).await;

    // Assert
    assert_eq!(emails(&row), ["dev@x.com"]);
}

#[tokio::test]
async fn duplicate_declined_wins_over_needs_action() {
    // Arrange
    let doc = meeting(&[
        "ATTENDEE;PARTSTAT=NEEDS-ACTION:mailto:dev@x.com",
        "ATTENDEE;PARTSTAT=declined:mailto:DEV@x.com",
    ]);
    let builder = ScheduleBuilder::new(FakeCalendar::new(vec![doc]), UtcOffset::default());

    // Act
    let row = single_row(builder).await;

    // Assert
    assert_eq!(row.attendees.len(), 1);
    assert_eq!(row.attendees[0].status, AttendeeStatus::Declined);
    assert_eq!(row.attendees[0].email, "dev@x.com");
}

#[tokio::test]
async fn failed_lookup_shows_email_only_for_that_attendee() {
    // Arrange
    let doc = meeting(&[
        "ATTENDEE;PARTSTAT=ACCEPTED:mailto:jane@x.com",
        "ATTENDEE;PARTSTAT=TENTATIVE:mailto:flaky@x.com",
        "ATTENDEE;ROLE=OPT-PARTICIPANT;PARTSTAT=DELEGATED:mailto:john@x.com",
        "ATTENDEE:mailto:stranger@x.com",
    ]);
    let directory = FakeDirectory::new()
        .with_name("jane@x.com", "Jane Doe")
        .with_name("john@x.com", "John Roe")
        .with_failure("flaky@x.com");
    let lookups = directory.lookups();
    let builder = ScheduleBuilder::new(FakeCalendar::new(vec![doc]), UtcOffset::default())
        .directory(directory);

    // Act
    let row = single_row(builder).await;

    // Assert
    let shown: Vec<_> = row
        .attendees
        .iter()
        .map(|a| (a.display(), a.status.marker()))
        .collect();
    assert_eq!(
        shown,
        [
            ("Jane Doe", '✓'),
            ("flaky@x.com", '?'),
            ("stranger@x.com", '○'),
            ("John Roe", '→'),
        ]
    );
    assert_eq!(lookups.load(Ordering::SeqCst), 4);

    let optional: Vec<_> = row.optional_attendees().map(|a| a.display()).collect();
    assert_eq!(optional, ["John Roe"]);
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt::Display, str::FromStr};

use jiff::Zoned;

/// One occurrence of a calendar event that overlaps the requested day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    /// `UID` of the event it was materialized from.
    pub uid: String,

    /// Start, in the configured offset.
    pub start: Zoned,

    /// End, in the configured offset. Equal to `start` for zero-length
    /// events.
    pub end: Zoned,

    /// Whether the event spans whole days rather than a time of day.
    pub all_day: bool,

    /// The summary of the event, empty when missing.
    pub subject: String,

    /// The location of the event, empty when missing.
    pub location: String,

    /// Organizer email address, if any.
    pub organizer: Option<String>,

    /// Attendees in the order they are listed in the event.
    pub attendees: Vec<RawAttendee>,
}

/// An attendee as listed on the event, before any filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttendee {
    /// Email address, without a `mailto:` scheme.
    pub email: String,

    /// Required or optional participation.
    pub role: AttendeeRole,

    /// Raw `PARTSTAT` token, if any.
    pub status: Option<String>,
}

/// Whether an attendee is expected to attend.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AttendeeRole {
    /// Everyone except `OPT-PARTICIPANT`.
    #[default]
    Required,

    /// `ROLE=OPT-PARTICIPANT`.
    Optional,
}

const ROLE_REQUIRED: &str = "REQ-PARTICIPANT";
const ROLE_OPTIONAL: &str = "OPT-PARTICIPANT";

impl AttendeeRole {
    /// Maps a raw `ROLE` token. Only `OPT-PARTICIPANT` is optional.
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some(role) if role.trim().eq_ignore_ascii_case(ROLE_OPTIONAL) => AttendeeRole::Optional,
            _ => AttendeeRole::Required,
        }
    }
}

impl AsRef<str> for AttendeeRole {
    fn as_ref(&self) -> &str {
        match self {
            AttendeeRole::Required => ROLE_REQUIRED,
            AttendeeRole::Optional => ROLE_OPTIONAL,
        }
    }
}

impl Display for AttendeeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// The participation status of an attendee.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttendeeStatus {
    /// The attendee accepted.
    Accepted,

    /// The attendee declined.
    Declined,

    /// The attendee tentatively accepted.
    Tentative,

    /// The attendee delegated to someone else.
    Delegated,

    /// No response yet, or an unrecognized token.
    #[default]
    NeedsAction,
}

const STATUS_ACCEPTED: &str = "ACCEPTED";
const STATUS_DECLINED: &str = "DECLINED";
const STATUS_TENTATIVE: &str = "TENTATIVE";
const STATUS_DELEGATED: &str = "DELEGATED";
const STATUS_NEEDS_ACTION: &str = "NEEDS-ACTION";

impl AttendeeStatus {
    /// Maps a raw `PARTSTAT` token. Missing and unknown tokens are
    /// [`AttendeeStatus::NeedsAction`].
    pub fn from_token(token: Option<&str>) -> Self {
        token
            .and_then(|t| t.trim().parse().ok())
            .unwrap_or_default()
    }

    /// The marker printed in front of the attendee.
    pub fn marker(self) -> char {
        match self {
            AttendeeStatus::Accepted => '✓',
            AttendeeStatus::Declined => '✗',
            AttendeeStatus::Tentative => '?',
            AttendeeStatus::Delegated => '→',
            AttendeeStatus::NeedsAction => '○',
        }
    }

    /// Rank used when the same attendee is listed twice; the higher rank
    /// is kept.
    pub(crate) fn precedence(self) -> u8 {
        match self {
            AttendeeStatus::Delegated => 4,
            AttendeeStatus::Declined => 3,
            AttendeeStatus::Accepted => 2,
            AttendeeStatus::Tentative => 1,
            AttendeeStatus::NeedsAction => 0,
        }
    }
}

impl AsRef<str> for AttendeeStatus {
    fn as_ref(&self) -> &str {
        match self {
            AttendeeStatus::Accepted => STATUS_ACCEPTED,
            AttendeeStatus::Declined => STATUS_DECLINED,
            AttendeeStatus::Tentative => STATUS_TENTATIVE,
            AttendeeStatus::Delegated => STATUS_DELEGATED,
            AttendeeStatus::NeedsAction => STATUS_NEEDS_ACTION,
        }
    }
}

impl Display for AttendeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for AttendeeStatus {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            STATUS_ACCEPTED => Ok(AttendeeStatus::Accepted),
            STATUS_DECLINED => Ok(AttendeeStatus::Declined),
            STATUS_TENTATIVE => Ok(AttendeeStatus::Tentative),
            STATUS_DELEGATED => Ok(AttendeeStatus::Delegated),
            STATUS_NEEDS_ACTION => Ok(AttendeeStatus::NeedsAction),
            _ => Err(()),
        }
    }
}

/// An attendee ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAttendee {
    /// Email address as listed on the event.
    pub email: String,

    /// Full name from the directory, if found.
    pub name: Option<String>,

    /// Required or optional participation.
    pub role: AttendeeRole,

    /// Participation status.
    pub status: AttendeeStatus,
}

impl ResolvedAttendee {
    /// The full name when resolved, otherwise the email address.
    pub fn display(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }

    /// Whether the attendee is optional.
    pub fn is_optional(&self) -> bool {
        self.role == AttendeeRole::Optional
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Span;

use crate::error::ParseError;
use crate::keyword::{
    KW_ATTENDEE, KW_DTEND, KW_DTSTART, KW_DURATION, KW_EXDATE, KW_LOCATION, KW_ORGANIZER,
    KW_PARTSTAT, KW_RDATE, KW_RECURRENCE_ID, KW_ROLE, KW_RRULE, KW_STATUS, KW_SUMMARY, KW_UID,
    KW_VCALENDAR, KW_VEVENT,
};
use crate::rrule::RecurrenceRule;
use crate::syntax::{Component, ContentLine, parse};
use crate::value::{DateTimeValue, cal_address, parse_duration, unescape_text};

/// Attendee of an event, taken from an `ATTENDEE` property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attendee {
    /// Email address without the `mailto:` scheme.
    pub address: String,
    /// `ROLE` parameter, upper-cased.
    pub role: Option<String>,
    /// `PARTSTAT` parameter, upper-cased.
    pub partstat: Option<String>,
}

impl Attendee {
    fn from_property(prop: &ContentLine) -> Self {
        let upper = |name| prop.param(name).map(str::to_ascii_uppercase);
        Self {
            address: cal_address(&prop.value),
            role: upper(KW_ROLE),
            partstat: upper(KW_PARTSTAT),
        }
    }
}

/// An owned `VEVENT`, reduced to the properties a day schedule needs.
#[derive(Debug, Clone)]
pub struct VEvent {
    /// `UID`, empty when absent.
    pub uid: String,
    /// `SUMMARY`, unescaped.
    pub summary: Option<String>,
    /// `LOCATION`, unescaped.
    pub location: Option<String>,
    /// `STATUS`, upper-cased.
    pub status: Option<String>,
    /// `DTSTART`
    pub dtstart: DateTimeValue,
    /// `DTEND`
    pub dtend: Option<DateTimeValue>,
    /// `DURATION`, only meaningful without `DTEND`.
    pub duration: Option<Span>,
    /// `ORGANIZER` address.
    pub organizer: Option<String>,
    /// `ATTENDEE` properties in order of appearance.
    pub attendees: Vec<Attendee>,
    /// `RRULE`, kept unparsed so a bad rule only affects its own series.
    pub rrule: Option<String>,
    /// `RDATE` values.
    pub rdates: Vec<DateTimeValue>,
    /// `EXDATE` values.
    pub exdates: Vec<DateTimeValue>,
    /// `RECURRENCE-ID`, set on overridden instances.
    pub recurrence_id: Option<DateTimeValue>,
}

impl VEvent {
    /// Builds an event from a parsed `VEVENT` component.
    ///
    /// # Errors
    ///
    /// Returns an error if `DTSTART` is missing or any date, date-time or
    /// duration value is malformed.
    pub fn from_component(component: &Component) -> Result<Self, ParseError> {
        let text = |name| component.property(name).map(|p| unescape_text(&p.value));

        let dtstart = component
            .property(KW_DTSTART)
            .ok_or_else(|| ParseError::invalid("DTSTART", ""))
            .and_then(DateTimeValue::from_property)?;

        let dtend = component
            .property(KW_DTEND)
            .map(DateTimeValue::from_property)
            .transpose()?;

        let duration = component
            .property(KW_DURATION)
            .map(|p| parse_duration(&p.value))
            .transpose()?;

        let recurrence_id = component
            .property(KW_RECURRENCE_ID)
            .map(DateTimeValue::from_property)
            .transpose()?;

        let mut rdates = Vec::new();
        for prop in component.properties_named(KW_RDATE) {
            rdates.extend(DateTimeValue::list_from_property(prop)?);
        }
        let mut exdates = Vec::new();
        for prop in component.properties_named(KW_EXDATE) {
            exdates.extend(DateTimeValue::list_from_property(prop)?);
        }

        Ok(Self {
            uid: component
                .property(KW_UID)
                .map(|p| p.value.trim().to_string())
                .unwrap_or_default(),
            summary: text(KW_SUMMARY),
            location: text(KW_LOCATION),
            status: component
                .property(KW_STATUS)
                .map(|p| p.value.trim().to_ascii_uppercase()),
            dtstart,
            dtend,
            duration,
            organizer: component.property(KW_ORGANIZER).map(|p| cal_address(&p.value)),
            attendees: component
                .properties_named(KW_ATTENDEE)
                .map(Attendee::from_property)
                .collect(),
            rrule: component.property(KW_RRULE).map(|p| p.value.trim().to_string()),
            rdates,
            exdates,
            recurrence_id,
        })
    }

    /// Parses the `RRULE` of this event, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule is malformed.
    pub fn recurrence_rule(&self) -> Result<Option<RecurrenceRule>, ParseError> {
        self.rrule.as_deref().map(str::parse).transpose()
    }

    /// Whether the event is marked `STATUS:CANCELLED`.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.status.as_deref() == Some("CANCELLED")
    }
}

/// Reads every `VEVENT` from an iCalendar document.
///
/// Each event is returned separately, so one malformed event does not hide
/// its siblings.
///
/// # Errors
///
/// Returns an error if the document itself cannot be parsed.
pub fn parse_events(src: &str) -> Result<Vec<Result<VEvent, ParseError>>, ParseError> {
    let roots = parse(src)?;
    let events = roots
        .iter()
        .filter(|c| c.name == KW_VCALENDAR)
        .flat_map(|c| c.children_named(KW_VEVENT))
        .map(VEvent::from_component)
        .collect();
    Ok(events)
}

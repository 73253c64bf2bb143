// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Keywords defined in iCalendar (RFC 5545) and vCard (RFC 6350) that the
//! reader looks at.

pub const KW_BEGIN: &str = "BEGIN";
pub const KW_END: &str = "END";

// Components
pub const KW_VCALENDAR: &str = "VCALENDAR";
pub const KW_VEVENT: &str = "VEVENT";
pub const KW_VCARD: &str = "VCARD";

// Parameters
pub const KW_PARTSTAT: &str = "PARTSTAT";
pub const KW_ROLE: &str = "ROLE";
pub const KW_TYPE: &str = "TYPE";
pub const KW_TZID: &str = "TZID";
pub const KW_VALUE: &str = "VALUE";
pub const KW_DATE: &str = "DATE";

// Event properties
pub const KW_UID: &str = "UID";
pub const KW_SUMMARY: &str = "SUMMARY";
pub const KW_LOCATION: &str = "LOCATION";
pub const KW_STATUS: &str = "STATUS";
pub const KW_DTSTART: &str = "DTSTART";
pub const KW_DTEND: &str = "DTEND";
pub const KW_DURATION: &str = "DURATION";
pub const KW_ORGANIZER: &str = "ORGANIZER";
pub const KW_ATTENDEE: &str = "ATTENDEE";
pub const KW_RRULE: &str = "RRULE";
pub const KW_RDATE: &str = "RDATE";
pub const KW_EXDATE: &str = "EXDATE";
pub const KW_RECURRENCE_ID: &str = "RECURRENCE-ID";

// vCard properties
pub const KW_FN: &str = "FN";
pub const KW_N: &str = "N";
pub const KW_EMAIL: &str = "EMAIL";

// Recurrence rule parts
pub const KW_RRULE_FREQ: &str = "FREQ";
pub const KW_RRULE_UNTIL: &str = "UNTIL";
pub const KW_RRULE_COUNT: &str = "COUNT";
pub const KW_RRULE_INTERVAL: &str = "INTERVAL";
pub const KW_RRULE_BYDAY: &str = "BYDAY";
pub const KW_RRULE_BYMONTHDAY: &str = "BYMONTHDAY";
pub const KW_RRULE_BYMONTH: &str = "BYMONTH";
pub const KW_RRULE_BYSETPOS: &str = "BYSETPOS";
pub const KW_RRULE_WKST: &str = "WKST";

pub const KW_RRULE_FREQ_SECONDLY: &str = "SECONDLY";
pub const KW_RRULE_FREQ_MINUTELY: &str = "MINUTELY";
pub const KW_RRULE_FREQ_HOURLY: &str = "HOURLY";
pub const KW_RRULE_FREQ_DAILY: &str = "DAILY";
pub const KW_RRULE_FREQ_WEEKLY: &str = "WEEKLY";
pub const KW_RRULE_FREQ_MONTHLY: &str = "MONTHLY";
pub const KW_RRULE_FREQ_YEARLY: &str = "YEARLY";

pub const KW_DAY_SU: &str = "SU";
pub const KW_DAY_MO: &str = "MO";
pub const KW_DAY_TU: &str = "TU";
pub const KW_DAY_WE: &str = "WE";
pub const KW_DAY_TH: &str = "TH";
pub const KW_DAY_FR: &str = "FR";
pub const KW_DAY_SA: &str = "SA";

pub const KW_MAILTO: &str = "mailto:";

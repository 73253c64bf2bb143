// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Read iCalendar events and vCard contacts.
//!
//! The crate is split into a syntax layer shared by both formats
//! ([`syntax`]) and typed views for the parts a day schedule needs:
//! [`VEvent`], [`RecurrenceRule`] and [`VCard`].

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::similar_names, clippy::single_match_else)]

mod error;
mod event;
pub mod keyword;
mod lexer;
pub mod rrule;
pub mod syntax;
pub mod value;
mod vcard;

pub use crate::error::ParseError;
pub use crate::event::{Attendee, VEvent, parse_events};
pub use crate::rrule::{Frequency, RecurrenceRule, WeekdayNum};
pub use crate::syntax::{Component, ContentLine, Parameter, parse};
pub use crate::value::DateTimeValue;
pub use crate::vcard::{StructuredName, VCard, parse_vcards};

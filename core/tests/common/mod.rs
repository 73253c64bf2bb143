// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! In-memory calendar and directory fakes plus helpers to write iCalendar
//! documents.

mod fixtures;

#[allow(unused_imports)]
pub use fixtures::{FakeCalendar, FakeDirectory, calendar, today, vevent};

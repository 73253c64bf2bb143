// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dayprint_core::{CalendarSource, DayWindow, Directory, Error};
use jiff::civil::{Date, date};

/// The day tests treat as today.
#[must_use]
pub fn today() -> Date {
    date(2025, 3, 10)
}

/// Wraps `VEVENT`s into a `VCALENDAR` document.
#[must_use]
pub fn calendar(events: &[String]) -> String {
    let mut doc = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//test//EN\r\n");
    for event in events {
        doc.push_str(event);
    }
    doc.push_str("END:VCALENDAR\r\n");
    doc
}

/// Builds a `VEVENT` from content lines.
#[must_use]
pub fn vevent(lines: &[&str]) -> String {
    let mut event = String::from("BEGIN:VEVENT\r\n");
    for line in lines {
        event.push_str(line);
        event.push_str("\r\n");
    }
    event.push_str("END:VEVENT\r\n");
    event
}

/// A calendar serving fixed documents, or failing like an unreachable
/// server.
#[derive(Debug, Clone, Default)]
pub struct FakeCalendar {
    documents: Vec<String>,
    failure: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl FakeCalendar {
    #[must_use]
    pub fn new(documents: Vec<String>) -> Self {
        Self {
            documents,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Self::default()
        }
    }

    /// Counter of fetches, shared with clones.
    #[must_use]
    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl CalendarSource for FakeCalendar {
    async fn fetch(&self, _window: DayWindow) -> Result<Vec<String>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(reason) => Err(Error::CalendarUnavailable(reason.clone())),
            None => Ok(self.documents.clone()),
        }
    }
}

/// A directory with known names and addresses whose lookup fails.
#[derive(Debug, Clone, Default)]
pub struct FakeDirectory {
    names: HashMap<String, String>,
    broken: Vec<String>,
    lookups: Arc<AtomicUsize>,
}

impl FakeDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, email: &str, name: &str) -> Self {
        self.names.insert(email.to_lowercase(), name.to_string());
        self
    }

    #[must_use]
    pub fn with_failure(mut self, email: &str) -> Self {
        self.broken.push(email.to_lowercase());
        self
    }

    /// Counter of lookups, shared with clones.
    #[must_use]
    pub fn lookups(&self) -> Arc<AtomicUsize> {
        self.lookups.clone()
    }
}

#[async_trait]
impl Directory for FakeDirectory {
    async fn lookup(&self, email: &str) -> Result<Option<String>, Error> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let key = email.to_lowercase();
        if self.broken.contains(&key) {
            return Err(Error::DirectoryLookupFailed {
                email: email.to_string(),
                reason: "connection timed out".to_string(),
            });
        }
        Ok(self.names.get(&key).cloned())
    }
}

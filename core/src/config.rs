// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use dayprint_caldav::{AuthMethod, DavConfig};

use crate::Error;
use crate::datetime::UtcOffset;

/// The name of the application.
pub const APP_NAME: &str = "dayprint";

/// Settings of the schedule engine.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Offset the day and all times are expressed in.
    #[serde(default)]
    pub utc_offset: UtcOffset,

    /// File listing meeting room addresses, one per line.
    #[serde(default = "default_meeting_rooms_file")]
    pub meeting_rooms_file: PathBuf,

    /// The calendar account.
    pub calendar: CalendarConfig,

    /// Address book used to resolve attendee names. Without it attendees
    /// are shown by email.
    #[serde(default)]
    pub directory: Option<DirectoryConfig>,
}

/// `CalDAV` account settings.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CalendarConfig {
    /// Server, principal or calendar URL.
    pub url: String,

    pub username: String,

    pub password: String,

    /// Display name or href of the calendar to read. Defaults to the first
    /// calendar holding events.
    #[serde(default)]
    pub calendar: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// `CardDAV` address book settings.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct DirectoryConfig {
    /// Address book home or address book URL.
    pub url: String,

    /// Defaults to the calendar username.
    #[serde(default)]
    pub username: Option<String>,

    /// Defaults to the calendar password.
    #[serde(default)]
    pub password: Option<String>,
}

/// The default meeting room list file.
pub fn default_meeting_rooms_file() -> PathBuf {
    PathBuf::from("meeting_room_emails.txt")
}

/// The default request timeout in seconds.
pub const fn default_timeout() -> u64 {
    30
}

impl Config {
    /// A configuration with defaults for everything but the calendar.
    pub fn new(calendar: CalendarConfig) -> Self {
        Self {
            utc_offset: UtcOffset::default(),
            meeting_rooms_file: default_meeting_rooms_file(),
            calendar,
            directory: None,
        }
    }

    /// Checks that the required settings are present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first missing setting.
    pub fn validate(&self) -> Result<(), Error> {
        let required = [
            ("calendar url", &self.calendar.url),
            ("calendar username", &self.calendar.username),
            ("calendar password", &self.calendar.password),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{name} is not set")));
            }
        }

        if self.calendar.timeout_secs == 0 {
            return Err(Error::Config("timeout must be positive".to_string()));
        }

        if let Some(directory) = &self.directory
            && directory.url.trim().is_empty()
        {
            return Err(Error::Config("directory url is empty".to_string()));
        }
        Ok(())
    }

    /// Connection settings for the calendar server.
    pub fn calendar_dav(&self) -> DavConfig {
        let mut dav = DavConfig::new(
            self.calendar.url.clone(),
            AuthMethod::Basic {
                username: self.calendar.username.clone(),
                password: self.calendar.password.clone(),
            },
        );
        dav.timeout_secs = self.calendar.timeout_secs;
        dav
    }

    /// Connection settings for the address book, with credentials falling
    /// back to the calendar's.
    pub fn directory_dav(&self) -> Option<DavConfig> {
        let directory = self.directory.as_ref()?;
        let username = directory
            .username
            .clone()
            .unwrap_or_else(|| self.calendar.username.clone());
        let password = directory
            .password
            .clone()
            .unwrap_or_else(|| self.calendar.password.clone());

        let mut dav = DavConfig::new(
            directory.url.clone(),
            AuthMethod::Basic { username, password },
        );
        dav.timeout_secs = self.calendar.timeout_secs;
        Some(dav)
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

/// Errors produced while building a day schedule.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The date expression matches none of the accepted forms, or names a
    /// day that does not exist.
    #[error(
        "invalid date '{0}': use +N, -N or 0 for an offset in days, or D.M.YYYY, D.M.YY or D.M"
    )]
    InvalidDateFormat(String),

    /// The UTC offset is not a signed number of hours.
    #[error("invalid UTC offset '{0}': use a number of hours such as +3, -5, 0 or +5.5")]
    InvalidOffset(String),

    /// The calendar server could not be reached or refused the request.
    #[error("calendar unavailable: {0}")]
    CalendarUnavailable(String),

    /// The address book could not be queried.
    #[error("directory lookup for '{email}' failed: {reason}")]
    DirectoryLookupFailed {
        /// Address that was looked up.
        email: String,
        /// Underlying failure.
        reason: String,
    },

    /// An event that cannot be placed on the schedule.
    #[error("malformed event '{uid}': {reason}")]
    MalformedEvent {
        /// `UID` of the event, empty when it has none.
        uid: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Missing or invalid settings.
    #[error("configuration error: {0}")]
    Config(String),

    /// A local file could not be read or written.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn malformed(uid: &str, reason: impl ToString) -> Self {
        Self::MalformedEvent {
            uid: uid.to_string(),
            reason: reason.to_string(),
        }
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Errors produced while reading iCalendar or vCard data.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The content line does not start with a property name.
    #[error("line {line}: missing property name")]
    MissingName {
        /// Logical (unfolded) line number, starting at 1.
        line: usize,
    },

    /// The content line has no `:` separating the value.
    #[error("line {line}: missing ':' before the property value")]
    MissingValue {
        /// Logical line number.
        line: usize,
    },

    /// A character that is not allowed in the name or parameter section.
    #[error("line {line}: invalid character in property name or parameters")]
    InvalidToken {
        /// Logical line number.
        line: usize,
    },

    /// A token appeared where another was expected.
    #[error("line {line}: unexpected {token}")]
    UnexpectedToken {
        /// Logical line number.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// `END` without a matching `BEGIN`.
    #[error("line {line}: END:{name} without BEGIN")]
    UnexpectedEnd {
        /// Logical line number.
        line: usize,
        /// Component name on the END line.
        name: String,
    },

    /// `END` closing a different component than the open one.
    #[error("line {line}: END:{found} does not close {expected}")]
    MismatchedEnd {
        /// Logical line number.
        line: usize,
        /// Name of the open component.
        expected: String,
        /// Name found on the END line.
        found: String,
    },

    /// A property line outside of `BEGIN`/`END`.
    #[error("line {line}: property outside of any component")]
    PropertyOutsideComponent {
        /// Logical line number.
        line: usize,
    },

    /// Input ended while a component was still open.
    #[error("component {name} is never closed")]
    UnclosedComponent {
        /// Name of the open component.
        name: String,
    },

    /// A property value that does not match its value type.
    #[error("invalid {kind} value '{value}'")]
    InvalidValue {
        /// Value type, e.g. `DATE-TIME`.
        kind: &'static str,
        /// The raw value.
        value: String,
    },
}

impl ParseError {
    pub(crate) fn invalid(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            kind,
            value: value.into(),
        }
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use dayprint_ical::value::cal_address;

use crate::directory::Directory;
use crate::event::{AttendeeRole, AttendeeStatus, RawAttendee, ResolvedAttendee};
use crate::exclusion::{ExclusionSet, normalize_email};

/// An attendee that survived filtering, not yet looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    email: String,
    role: AttendeeRole,
    status: AttendeeStatus,
}

/// Turns the attendee list of one event into display entries.
///
/// The organizer and excluded resources are dropped, duplicate addresses
/// are merged, names are looked up in `directory`, and required attendees
/// come before optional ones. Within each group the order of the event is
/// kept. A failing lookup only costs that attendee its name.
pub async fn resolve_attendees(
    attendees: &[RawAttendee],
    organizer: Option<&str>,
    exclusions: &ExclusionSet,
    directory: &dyn Directory,
) -> Vec<ResolvedAttendee> {
    let candidates = filter_attendees(attendees, organizer, exclusions);

    let mut resolved = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let name = match directory.lookup(&candidate.email).await {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(email = %candidate.email, error = %e, "falling back to email");
                None
            }
        };
        resolved.push(ResolvedAttendee {
            email: candidate.email,
            name,
            role: candidate.role,
            status: candidate.status,
        });
    }

    // stable, so the event's order survives within each group
    resolved.sort_by_key(|a| a.role == AttendeeRole::Optional);
    resolved
}

/// Exclusion and deduplication, without any lookups.
///
/// When an address is listed more than once the entry keeps the position
/// of its first listing, the strongest status (see
/// [`AttendeeStatus::precedence`]) and is required if any listing is.
fn filter_attendees(
    attendees: &[RawAttendee],
    organizer: Option<&str>,
    exclusions: &ExclusionSet,
) -> Vec<Candidate> {
    let organizer = organizer.and_then(normalize_email);

    let mut candidates: Vec<Candidate> = Vec::with_capacity(attendees.len());
    let mut seen: HashMap<String, usize> = HashMap::new();
    for attendee in attendees {
        let Some(key) = normalize_email(&attendee.email) else {
            continue;
        };
        if organizer.as_ref() == Some(&key) || exclusions.contains(&key) {
            tracing::debug!(email = %attendee.email, "excluding attendee");
            continue;
        }

        let status = AttendeeStatus::from_token(attendee.status.as_deref());
        match seen.get(&key) {
            Some(&index) => {
                let Some(existing) = candidates.get_mut(index) else {
                    continue;
                };
                if status.precedence() > existing.status.precedence() {
                    existing.status = status;
                }
                if attendee.role == AttendeeRole::Required {
                    existing.role = AttendeeRole::Required;
                }
            }
            None => {
                seen.insert(key, candidates.len());
                candidates.push(Candidate {
                    email: cal_address(&attendee.email),
                    role: attendee.role,
                    status,
                });
            }
        }
    }
    candidates
}

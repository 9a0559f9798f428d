//! Report schedule clashes for the proposed hosts of a session.
//!
//! For each host, a clash is any session the host is already hosting, or has
//! an RSVP for, that overlaps the candidate session. Clashes are advisory:
//! callers warn but still allow the booking.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::format_hhmm;
use crate::model::{Guest, GuestId, Rsvp, Session, SessionId};
use crate::overlap::overlaps;

/// A host's existing commitments, resolved into full session records.
#[derive(Debug, Clone, PartialEq)]
pub struct HostCommitments {
    pub guest: Guest,
    /// Sessions the guest hosts.
    pub hosted: Vec<Session>,
    /// Sessions the guest has an RSVP for.
    pub attending: Vec<Session>,
}

impl HostCommitments {
    /// Gather `guest`'s commitments from a point-in-time snapshot.
    ///
    /// RSVPs pointing at sessions missing from `sessions` are skipped.
    pub fn resolve(guest: &Guest, sessions: &[Session], rsvps: &[Rsvp]) -> Self {
        let hosted = sessions
            .iter()
            .filter(|s| s.is_hosted_by(&guest.id))
            .cloned()
            .collect();

        let attending = rsvps
            .iter()
            .filter(|r| r.guest == guest.id)
            .filter_map(|r| {
                sessions
                    .iter()
                    .find(|s| s.id.as_ref() == Some(&r.session))
            })
            .cloned()
            .collect();

        Self {
            guest: guest.clone(),
            hosted,
            attending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClashKind {
    Hosting,
    Attending,
}

impl ClashKind {
    fn verb(self) -> &'static str {
        match self {
            ClashKind::Hosting => "hosting",
            ClashKind::Attending => "attending",
        }
    }
}

/// One existing commitment of a host that overlaps the candidate session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clash {
    pub host: GuestId,
    pub host_name: String,
    pub kind: ClashKind,
    pub session: Option<SessionId>,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Clash {
    /// `"<host> is hosting <title> from HH:mm to HH:mm"`, times in `tz`.
    pub fn describe(&self, tz: Tz) -> String {
        format!(
            "{} is {} {} from {} to {}",
            self.host_name,
            self.kind.verb(),
            self.title,
            format_hhmm(self.start, tz),
            format_hhmm(self.end, tz)
        )
    }
}

/// Find every clash between `candidate` and the commitments of `hosts`.
///
/// Output is grouped by host in input order; within a host, hosting clashes
/// come before attending clashes. A (host, session) pair appears at most once
/// per kind, but may appear under both kinds.
pub fn compute_clashes(candidate: &Session, hosts: &[HostCommitments]) -> Vec<Clash> {
    let mut clashes = Vec::new();

    for host in hosts {
        let hosting = host
            .hosted
            .iter()
            .filter(|s| s.is_hosted_by(&host.guest.id));
        collect_kind(&mut clashes, candidate, host, ClashKind::Hosting, hosting);
        collect_kind(
            &mut clashes,
            candidate,
            host,
            ClashKind::Attending,
            host.attending.iter(),
        );
    }

    debug!(
        hosts = hosts.len(),
        clashes = clashes.len(),
        "computed host clashes"
    );
    clashes
}

/// [`compute_clashes`] rendered with [`Clash::describe`].
pub fn describe_clashes(candidate: &Session, hosts: &[HostCommitments], tz: Tz) -> Vec<String> {
    compute_clashes(candidate, hosts)
        .iter()
        .map(|c| c.describe(tz))
        .collect()
}

fn collect_kind<'a>(
    out: &mut Vec<Clash>,
    candidate: &Session,
    host: &HostCommitments,
    kind: ClashKind,
    sessions: impl Iterator<Item = &'a Session>,
) {
    let mut seen: HashSet<&SessionId> = HashSet::new();
    for session in sessions {
        if !overlaps(candidate, session) {
            continue;
        }
        if let Some(id) = &session.id {
            if !seen.insert(id) {
                continue;
            }
        }
        let Some((start, end)) = session.interval() else {
            continue;
        };
        out.push(Clash {
            host: host.guest.id.clone(),
            host_name: host.guest.name.clone(),
            kind,
            session: session.id.clone(),
            title: session.title.clone(),
            start,
            end,
        });
    }
}

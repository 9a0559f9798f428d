//! Detect overlapping sessions.
//!
//! Every conflict check in the crate (venue occupancy, host and attendee
//! clashes, the final check before a booking is committed) is built on
//! [`overlaps`]. Intervals are half-open: sessions that merely touch at a
//! boundary do not overlap.

use chrono::{DateTime, Utc};

use crate::model::Session;

/// Whether two sessions overlap in time.
///
/// Two sessions overlap iff they do not share a saved identity, both
/// have a valid interval, and `max(a.start, b.start) < min(a.end, b.end)`.
/// A session compared against itself (the same ID, or the same record when it
/// has no ID yet), or against an unscheduled placeholder, never overlaps.
pub fn overlaps(a: &Session, b: &Session) -> bool {
    shared_interval(a, b).is_some()
}

/// Length in minutes of the interval shared by two sessions, 0 when they do
/// not overlap.
pub fn overlap_minutes(a: &Session, b: &Session) -> i64 {
    shared_interval(a, b)
        .map(|(start, end)| (end - start).num_minutes())
        .unwrap_or(0)
}

/// All sessions in `sessions` that overlap `candidate`, in input order.
pub fn overlapping<'a>(
    candidate: &'a Session,
    sessions: &'a [Session],
) -> impl Iterator<Item = &'a Session> + 'a {
    sessions.iter().filter(move |s| overlaps(candidate, s))
}

fn shared_interval(a: &Session, b: &Session) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    if std::ptr::eq(a, b) || a.same_identity(b) {
        return None;
    }
    let (a_start, a_end) = a.interval()?;
    let (b_start, b_end) = b.interval()?;
    let start = a_start.max(b_start);
    let end = a_end.min(b_end);
    // Strict: excludes the adjacent case where a.end == b.start.
    (start < end).then_some((start, end))
}

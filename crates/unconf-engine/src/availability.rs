//! Candidate start times for a new or edited session.
//!
//! The booking window of a day is cut into half-hour ticks. With a venue
//! chosen, each tick is either occupied by a session already booked at that
//! venue or free until the next booking (or the end of the window). Before a
//! venue is chosen nothing venue-specific can be evaluated, so every tick is
//! offered with a generic maximum.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use tracing::{debug, trace};

use crate::clock::format_hhmm;
use crate::model::{CandidateSlot, Day, Session, Venue};

/// Granularity of candidate start times.
pub const SLOT_MINUTES: i64 = 30;

/// Maximum duration offered while no venue is selected.
pub const UNCONSTRAINED_MAX_MINUTES: i64 = 180;

/// Compute the candidate start times for `current_session` on `day`.
///
/// # Arguments
///
/// * `day` — Supplies the booking window `[start_bookings, end_bookings)`.
/// * `all_sessions` — Every committed session, at any venue.
/// * `current_session` — The session being edited, excluded from occupancy so
///   it never blocks itself. Pass [`Session::empty`] when creating.
/// * `venue` — The selected venue, if any.
/// * `tz` — Display timezone for slot labels.
///
/// Slots are returned in chronological order. Occupancy is half-open: a tick
/// at another session's start is occupied, a tick at its end is free.
pub fn compute_available_start_times(
    day: &Day,
    all_sessions: &[Session],
    current_session: &Session,
    venue: Option<&Venue>,
    tz: Tz,
) -> Vec<CandidateSlot> {
    let ticks = booking_ticks(day);

    let Some(venue) = venue else {
        debug!(day = %day.id, ticks = ticks.len(), "no venue selected, all ticks open");
        return ticks
            .into_iter()
            .map(|t| slot(t, UNCONSTRAINED_MAX_MINUTES, true, tz))
            .collect();
    };

    let mut booked: Vec<(DateTime<Utc>, DateTime<Utc>)> = all_sessions
        .iter()
        .filter(|s| s.is_at(&venue.id) && !s.same_identity(current_session))
        .filter_map(Session::interval)
        .collect();
    booked.sort_by_key(|&(start, end)| (start, end));

    debug!(
        day = %day.id,
        venue = %venue.id,
        bookings = booked.len(),
        ticks = ticks.len(),
        "computing venue availability"
    );

    ticks
        .into_iter()
        .map(|t| {
            if booked.iter().any(|&(start, end)| start <= t && t < end) {
                trace!(tick = %t, "occupied");
                return slot(t, 0, false, tz);
            }
            let next_booking = booked
                .iter()
                .map(|&(start, _)| start)
                .find(|&start| start > t)
                .unwrap_or(day.end_bookings);
            // Whole minutes, truncated. A free tick stays available even when
            // the next booking is less than a minute away.
            slot(t, (next_booking - t).num_minutes(), true, tz)
        })
        .collect()
}

/// Durations the form offers for a slot: every multiple of [`SLOT_MINUTES`]
/// up to and including `max_duration_minutes`.
pub fn duration_options(max_duration_minutes: i64) -> Vec<i64> {
    (1..)
        .map(|n| n * SLOT_MINUTES)
        .take_while(|&minutes| minutes <= max_duration_minutes)
        .collect()
}

/// Tick instants `start_bookings, start_bookings + 30m, ...` strictly before
/// `end_bookings`. Empty for an empty or inverted window.
fn booking_ticks(day: &Day) -> Vec<DateTime<Utc>> {
    let step = Duration::minutes(SLOT_MINUTES);
    let mut ticks = Vec::new();
    let mut cursor = day.start_bookings;
    while cursor < day.end_bookings {
        ticks.push(cursor);
        cursor += step;
    }
    ticks
}

fn slot(
    start: DateTime<Utc>,
    max_duration_minutes: i64,
    available: bool,
    tz: Tz,
) -> CandidateSlot {
    CandidateSlot {
        label: format_hhmm(start, tz),
        start,
        max_duration_minutes,
        available,
    }
}

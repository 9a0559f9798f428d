//! Turn a scheduling form draft into a session record.
//!
//! This is the authoritative check right before a booking is committed:
//! required fields, the booking window, and a final overlap check against the
//! sessions already at the venue. Host clashes are not checked here; they are
//! advisory and reported separately by [`crate::clash`].

use chrono::Duration;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock::{format_hhmm, local_time_on};
use crate::error::SubmissionError;
use crate::model::{Day, DayId, GuestId, ProposalId, Session, SessionId, Venue, VenueId};
use crate::overlap::overlapping;

/// What the host filled in on the scheduling form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionDraft {
    /// Set when editing an existing session.
    #[serde(default)]
    pub id: Option<SessionId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hosts: Vec<GuestId>,
    #[serde(default)]
    pub venue: Option<VenueId>,
    pub day: DayId,
    /// `HH:mm` in the display timezone, on `day`.
    pub start_time: String,
    pub duration_minutes: i64,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub proposal: Option<ProposalId>,
}

/// Validate `draft` and build the session to persist.
///
/// `existing` is the stored session when editing and must carry the draft's
/// ID; a session that is not editable is rejected before any field is looked
/// at. `venue` must be the record of the venue the draft names.
///
/// # Errors
///
/// Returns the first [`SubmissionError`] found, in the order: authorization,
/// required fields, start time, booking window, venue overlap.
pub fn prepare_session(
    draft: &SessionDraft,
    day: &Day,
    venue: Option<&Venue>,
    all_sessions: &[Session],
    existing: Option<&Session>,
    tz: Tz,
) -> Result<Session, SubmissionError> {
    if let Some(id) = &draft.id {
        match existing {
            Some(existing) if existing.id.as_ref() == Some(id) => {}
            _ => return Err(SubmissionError::UnknownSession(id.clone())),
        }
    }
    if let Some(existing) = existing {
        if !existing.is_editable() {
            let id = existing.id.clone().unwrap_or_default();
            debug!(session = %id, "rejected edit of frozen session");
            return Err(SubmissionError::NotEditable(id));
        }
    }

    if draft.title.trim().is_empty() {
        return Err(SubmissionError::MissingTitle);
    }
    if draft.hosts.is_empty() {
        return Err(SubmissionError::MissingHosts);
    }
    let venue = match (venue, &draft.venue) {
        (Some(venue), Some(chosen)) if &venue.id == chosen => venue,
        (Some(venue), Some(chosen)) => {
            return Err(SubmissionError::VenueMismatch {
                chosen: chosen.clone(),
                given: venue.id.clone(),
            })
        }
        _ => return Err(SubmissionError::MissingVenue),
    };
    if !venue.bookable {
        return Err(SubmissionError::VenueNotBookable(venue.name.clone()));
    }
    if draft.duration_minutes <= 0 {
        return Err(SubmissionError::InvalidDuration(draft.duration_minutes));
    }

    let start = local_time_on(day.start, &draft.start_time, tz)
        .ok_or_else(|| SubmissionError::InvalidStartTime(draft.start_time.clone()))?;
    if start < day.start_bookings || start >= day.end_bookings {
        return Err(SubmissionError::OutsideBookingWindow(draft.start_time.clone()));
    }
    let end = start + Duration::minutes(draft.duration_minutes);
    if end > day.end {
        return Err(SubmissionError::PastDayEnd(format_hhmm(day.end, tz)));
    }

    let session = Session {
        id: draft
            .id
            .clone()
            .or_else(|| existing.and_then(|s| s.id.clone())),
        title: draft.title.trim().to_string(),
        description: draft.description.clone(),
        start: Some(start),
        end: Some(end),
        hosts: draft.hosts.clone(),
        venue: Some(venue.id.clone()),
        capacity: draft.capacity,
        attendee_scheduled: true,
        blocker: false,
        closed: draft.closed,
        proposal: draft.proposal.clone(),
    };

    let at_venue: Vec<Session> = all_sessions
        .iter()
        .filter(|s| s.is_at(&venue.id))
        .cloned()
        .collect();
    if let Some(taken) = overlapping(&session, &at_venue).next() {
        let (taken_start, taken_end) = taken.interval().unwrap_or((start, end));
        debug!(venue = %venue.id, blocking = %taken.title, "venue already booked");
        return Err(SubmissionError::VenueConflict {
            title: taken.title.clone(),
            start: format_hhmm(taken_start, tz),
            end: format_hhmm(taken_end, tz),
        });
    }

    info!(
        venue = %venue.id,
        start = %start,
        minutes = draft.duration_minutes,
        "session draft accepted"
    );
    Ok(session)
}

//! Error types for unconf-engine operations.
//!
//! The scheduling computations themselves never fail; these errors come from
//! parsing inputs at the edges (timezones, datetimes, snapshots) and from the
//! submission layer that turns a form draft into a session record.

use thiserror::Error;

use crate::model::{GuestId, SessionId, VenueId};

#[derive(Error, Debug)]
pub enum UnconfError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDateTime(String),

    #[error("Snapshot parse error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Unknown {kind}: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("{guest} already has an RSVP for session {session}")]
    DuplicateRsvp { guest: GuestId, session: SessionId },

    #[error("{guest} hosts session {session} and cannot RSVP to it")]
    HostRsvp { guest: GuestId, session: SessionId },
}

/// Reasons a session draft is rejected at submission time.
///
/// Validation failures are shown inline next to the form; `NotEditable` is an
/// authorization failure that happens before any field is looked at.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Unknown session: {0}")]
    UnknownSession(SessionId),

    #[error("Session {0} is not editable")]
    NotEditable(SessionId),

    #[error("Title is required")]
    MissingTitle,

    #[error("At least one host is required")]
    MissingHosts,

    #[error("A venue is required")]
    MissingVenue,

    #[error("Draft names venue {chosen} but venue {given} was supplied")]
    VenueMismatch { chosen: VenueId, given: VenueId },

    #[error("Venue {0} is not bookable")]
    VenueNotBookable(String),

    #[error("Invalid start time '{0}', expected HH:mm")]
    InvalidStartTime(String),

    #[error("Duration must be positive, got {0} minutes")]
    InvalidDuration(i64),

    #[error("Start time {0} is outside the booking window")]
    OutsideBookingWindow(String),

    #[error("Session would run past the end of the day ({0})")]
    PastDayEnd(String),

    #[error("Venue is already booked by '{title}' from {start} to {end}")]
    VenueConflict {
        title: String,
        start: String,
        end: String,
    },
}

pub type Result<T> = std::result::Result<T, UnconfError>;

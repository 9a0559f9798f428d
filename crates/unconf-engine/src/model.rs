//! Typed records for events, days, venues, guests, sessions and RSVPs.
//!
//! Relations are plain identifiers: a session points at one optional venue and
//! a list of host guests, an RSVP pairs one guest with one session. Times are
//! stored in UTC and only converted to the display timezone for labels.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

id_type!(
    /// Identifier of a scheduled (or to-be-scheduled) session.
    SessionId
);
id_type!(GuestId);
id_type!(VenueId);
id_type!(DayId);
id_type!(EventId);
id_type!(ProposalId);

/// The unit being scheduled.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Session {
    /// `None` until the session has been persisted.
    #[serde(default)]
    pub id: Option<SessionId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub hosts: Vec<GuestId>,
    #[serde(default)]
    pub venue: Option<VenueId>,
    #[serde(default)]
    pub capacity: u32,
    /// Set when an attendee booked this slot through the form, as opposed to
    /// organizer-placed programme items.
    #[serde(default)]
    pub attendee_scheduled: bool,
    /// Organizer override that freezes the slot.
    #[serde(default)]
    pub blocker: bool,
    /// Late arrivals are not admitted.
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub proposal: Option<ProposalId>,
}

impl Session {
    /// The "not yet created" sentinel: no identity and no times.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Both endpoints, when they are set and form a non-empty interval.
    ///
    /// A session with one missing endpoint or an inverted interval is treated
    /// exactly like the empty sentinel by every scheduling computation.
    pub fn interval(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start < end => Some((start, end)),
            _ => None,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.interval().is_some()
    }

    pub fn duration_minutes(&self) -> i64 {
        self.interval()
            .map(|(start, end)| (end - start).num_minutes())
            .unwrap_or(0)
    }

    /// Hosts may only change sessions they booked themselves and that the
    /// organizers have not frozen.
    pub fn is_editable(&self) -> bool {
        self.attendee_scheduled && !self.blocker
    }

    pub fn is_hosted_by(&self, guest: &GuestId) -> bool {
        self.hosts.contains(guest)
    }

    pub fn is_at(&self, venue: &VenueId) -> bool {
        self.venue.as_ref() == Some(venue)
    }

    /// True when both sessions carry the same saved identity. Sessions without
    /// an ID are never the same as anything else.
    pub fn same_identity(&self, other: &Session) -> bool {
        matches!((&self.id, &other.id), (Some(a), Some(b)) if a == b)
    }
}

/// A calendar day of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    pub id: DayId,
    #[serde(default)]
    pub event: Option<EventId>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// New sessions may only start inside `[start_bookings, end_bookings)`.
    pub start_bookings: DateTime<Utc>,
    pub end_bookings: DateTime<Utc>,
}

impl Day {
    pub fn booking_window_minutes(&self) -> i64 {
        (self.end_bookings - self.start_bookings).num_minutes().max(0)
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// A bookable physical or virtual space. Hosts at most one session at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub bookable: bool,
    #[serde(default)]
    pub color: String,
    /// Empty in single-event deployments.
    #[serde(default)]
    pub events: Vec<EventId>,
}

impl Venue {
    pub fn serves(&self, event: &EventId) -> bool {
        self.events.is_empty() || self.events.contains(event)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub id: GuestId,
    pub name: String,
}

/// A guest's intent to attend a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rsvp {
    pub guest: GuestId,
    pub session: SessionId,
}

/// An event with optional phase windows. See [`crate::phase`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    #[serde(default)]
    pub proposal_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub proposal_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub voting_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub voting_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scheduling_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scheduling_end: Option<DateTime<Utc>>,
}

/// A start-time option offered by the scheduling form. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSlot {
    /// `HH:mm` in the display timezone.
    pub label: String,
    pub start: DateTime<Utc>,
    /// 0 when the slot is unavailable.
    pub max_duration_minutes: i64,
    pub available: bool,
}

//! A point-in-time copy of everything the engine reads.
//!
//! Callers fetch a snapshot, run the calculators over it, and re-fetch after
//! every mutation. The mutators here only keep the snapshot internally
//! consistent (RSVP cascade, RSVP rules); they do not talk to any store.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clash::HostCommitments;
use crate::error::{Result, UnconfError};
use crate::model::{
    Day, DayId, Event, EventId, Guest, GuestId, Rsvp, Session, SessionId, Venue, VenueId,
};
use crate::voting::{Proposal, Vote};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub days: Vec<Day>,
    #[serde(default)]
    pub venues: Vec<Venue>,
    #[serde(default)]
    pub guests: Vec<Guest>,
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub rsvps: Vec<Rsvp>,
    #[serde(default)]
    pub proposals: Vec<Proposal>,
    #[serde(default)]
    pub votes: Vec<Vote>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn event(&self, id: &EventId) -> Result<&Event> {
        self.events
            .iter()
            .find(|e| &e.id == id)
            .ok_or_else(|| not_found("event", id.as_str()))
    }

    pub fn day(&self, id: &DayId) -> Result<&Day> {
        self.days
            .iter()
            .find(|d| &d.id == id)
            .ok_or_else(|| not_found("day", id.as_str()))
    }

    pub fn venue(&self, id: &VenueId) -> Result<&Venue> {
        self.venues
            .iter()
            .find(|v| &v.id == id)
            .ok_or_else(|| not_found("venue", id.as_str()))
    }

    pub fn guest(&self, id: &GuestId) -> Result<&Guest> {
        self.guests
            .iter()
            .find(|g| &g.id == id)
            .ok_or_else(|| not_found("guest", id.as_str()))
    }

    pub fn session(&self, id: &SessionId) -> Result<&Session> {
        self.sessions
            .iter()
            .find(|s| s.id.as_ref() == Some(id))
            .ok_or_else(|| not_found("session", id.as_str()))
    }

    /// Venues offered by the scheduling form for `event`.
    pub fn bookable_venues(&self, event: &EventId) -> Vec<&Venue> {
        self.venues
            .iter()
            .filter(|v| v.bookable && v.serves(event))
            .collect()
    }

    /// Sessions whose start falls on `day`.
    pub fn sessions_on(&self, day: &Day) -> Vec<&Session> {
        self.sessions
            .iter()
            .filter(|s| s.start.is_some_and(|start| day.contains(start)))
            .collect()
    }

    /// Resolve the commitments of each guest in `guests`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`UnconfError::NotFound`] for an unknown guest.
    pub fn host_commitments(&self, guests: &[GuestId]) -> Result<Vec<HostCommitments>> {
        guests
            .iter()
            .map(|id| {
                let guest = self.guest(id)?;
                Ok(HostCommitments::resolve(guest, &self.sessions, &self.rsvps))
            })
            .collect()
    }

    /// Remove a session and every RSVP against it.
    pub fn remove_session(&mut self, id: &SessionId) -> Result<Session> {
        let index = self
            .sessions
            .iter()
            .position(|s| s.id.as_ref() == Some(id))
            .ok_or_else(|| not_found("session", id.as_str()))?;
        let removed = self.sessions.remove(index);
        let before = self.rsvps.len();
        self.rsvps.retain(|r| &r.session != id);
        debug!(
            session = %id,
            rsvps = before - self.rsvps.len(),
            "removed session and its rsvps"
        );
        Ok(removed)
    }

    /// Record an RSVP.
    ///
    /// # Errors
    ///
    /// Rejects RSVPs for unknown sessions, by a host of the session, and
    /// duplicates.
    pub fn add_rsvp(&mut self, rsvp: Rsvp) -> Result<()> {
        let session = self.session(&rsvp.session)?;
        if session.is_hosted_by(&rsvp.guest) {
            return Err(UnconfError::HostRsvp {
                guest: rsvp.guest,
                session: rsvp.session,
            });
        }
        if self.rsvps.contains(&rsvp) {
            return Err(UnconfError::DuplicateRsvp {
                guest: rsvp.guest,
                session: rsvp.session,
            });
        }
        self.rsvps.push(rsvp);
        Ok(())
    }
}

fn not_found(kind: &'static str, id: &str) -> UnconfError {
    UnconfError::NotFound {
        kind,
        id: id.to_string(),
    }
}

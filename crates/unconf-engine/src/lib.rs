//! # unconf-engine
//!
//! Scheduling core for unconference events: which start times are free at a
//! venue, whether two sessions overlap, and which of a session's hosts would
//! be double-booked.
//!
//! Every computation is pure and synchronous over an already-fetched
//! [`Snapshot`]. Callers re-fetch and re-run after each mutation.
//!
//! ## Modules
//!
//! - [`model`] — Typed sessions, days, venues, guests, RSVPs, events
//! - [`overlap`] — Half-open overlap predicate shared by every conflict check
//! - [`availability`] — Half-hour candidate start times with max durations
//! - [`clash`] — Hosting/attending clash reports for proposed hosts
//! - [`phase`] — Wall-clock phase gate (proposal, voting, scheduling)
//! - [`voting`] — Quick-voting order and vote tallies
//! - [`submission`] — Draft validation before a booking is committed
//! - [`snapshot`] — Point-in-time data with lookups and RSVP rules
//! - [`clock`] — Display-timezone formatting and parsing
//! - [`config`] — Engine settings
//! - [`error`] — Error types

pub mod availability;
pub mod clash;
pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod overlap;
pub mod phase;
pub mod snapshot;
pub mod submission;
pub mod voting;

pub use availability::{compute_available_start_times, SLOT_MINUTES, UNCONSTRAINED_MAX_MINUTES};
pub use clash::{compute_clashes, describe_clashes, Clash, ClashKind, HostCommitments};
pub use config::EngineConfig;
pub use error::{SubmissionError, UnconfError};
pub use model::{CandidateSlot, Day, Event, Guest, Rsvp, Session, Venue};
pub use overlap::overlaps;
pub use phase::{current_phase, Phase};
pub use snapshot::Snapshot;
pub use submission::{prepare_session, SessionDraft};
pub use voting::next_proposal_to_vote;

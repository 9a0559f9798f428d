//! Event phase gate.
//!
//! An event moves through proposal, voting and scheduling purely as a function
//! of wall-clock time against its configured windows. Nothing is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Proposal,
    Voting,
    Scheduling,
    Inactive,
}

impl Phase {
    pub fn allows_proposals(self) -> bool {
        self == Phase::Proposal
    }

    pub fn allows_voting(self) -> bool {
        self == Phase::Voting
    }

    pub fn allows_scheduling(self) -> bool {
        self == Phase::Scheduling
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Proposal => "proposal",
            Phase::Voting => "voting",
            Phase::Scheduling => "scheduling",
            Phase::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `[start, end)` window. Without a start the window never opens; without
/// an end it never closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl PhaseWindow {
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        match self.start {
            Some(start) => start <= now && self.end.is_none_or(|end| now < end),
            None => false,
        }
    }
}

impl Event {
    pub fn proposal_window(&self) -> PhaseWindow {
        PhaseWindow {
            start: self.proposal_start,
            end: self.proposal_end,
        }
    }

    pub fn voting_window(&self) -> PhaseWindow {
        PhaseWindow {
            start: self.voting_start,
            end: self.voting_end,
        }
    }

    pub fn scheduling_window(&self) -> PhaseWindow {
        PhaseWindow {
            start: self.scheduling_start,
            end: self.scheduling_end,
        }
    }

    fn has_phase_windows(&self) -> bool {
        self.proposal_start.is_some() || self.voting_start.is_some() || self.scheduling_start.is_some()
    }
}

/// The phase `event` is in at `now`.
///
/// Windows are checked in priority order proposal, voting, scheduling. An
/// event with no phase start configured at all is always open for
/// scheduling.
pub fn current_phase(event: &Event, now: DateTime<Utc>) -> Phase {
    if !event.has_phase_windows() {
        return Phase::Scheduling;
    }
    if event.proposal_window().contains(now) {
        Phase::Proposal
    } else if event.voting_window().contains(now) {
        Phase::Voting
    } else if event.scheduling_window().contains(now) {
        Phase::Scheduling
    } else {
        Phase::Inactive
    }
}

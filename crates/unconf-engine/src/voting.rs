//! Proposal votes and the quick-voting order.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::{GuestId, ProposalId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hosts: Vec<GuestId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Interested,
    Maybe,
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub guest: GuestId,
    pub proposal: ProposalId,
    pub choice: VoteChoice,
}

/// Vote counts for one proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteTally {
    pub proposal: ProposalId,
    pub interested: usize,
    pub maybe: usize,
    pub skip: usize,
}

impl VoteTally {
    pub fn total(&self) -> usize {
        self.interested + self.maybe + self.skip
    }
}

/// The proposal `guest` should vote on next.
///
/// Picks, among proposals the guest has neither voted on nor hosts, the one
/// with the fewest votes so far. Ties go to the proposal listed first.
pub fn next_proposal_to_vote<'a>(
    proposals: &'a [Proposal],
    votes: &[Vote],
    guest: &GuestId,
) -> Option<&'a Proposal> {
    let voted: HashSet<&ProposalId> = votes
        .iter()
        .filter(|v| &v.guest == guest)
        .map(|v| &v.proposal)
        .collect();

    let mut counts: HashMap<&ProposalId, usize> = HashMap::new();
    for vote in votes {
        *counts.entry(&vote.proposal).or_default() += 1;
    }

    proposals
        .iter()
        .filter(|p| !voted.contains(&p.id) && !p.hosts.contains(guest))
        // min_by_key returns the first minimum, which keeps input order on ties.
        .min_by_key(|p| counts.get(&p.id).copied().unwrap_or(0))
}

/// Count votes per proposal, in proposal order. Votes for unknown proposals
/// are ignored.
pub fn tally(proposals: &[Proposal], votes: &[Vote]) -> Vec<VoteTally> {
    proposals
        .iter()
        .map(|p| {
            let mut t = VoteTally {
                proposal: p.id.clone(),
                interested: 0,
                maybe: 0,
                skip: 0,
            };
            for vote in votes.iter().filter(|v| v.proposal == p.id) {
                match vote.choice {
                    VoteChoice::Interested => t.interested += 1,
                    VoteChoice::Maybe => t.maybe += 1,
                    VoteChoice::Skip => t.skip += 1,
                }
            }
            t
        })
        .collect()
}

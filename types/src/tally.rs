//! Ballots, weighted vote sets, and claim outcomes.

use crate::address::AccountAddress;
use crate::claim::ResolutionState;
use crate::stake::{Stake, Stance, Vote};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three independent ways an account can weigh in on a claim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ballot {
    Backing(Stake),
    Challenge(Stake),
    TokenVote(Vote),
}

impl Ballot {
    pub fn kind(&self) -> BallotKind {
        match self {
            Self::Backing(_) => BallotKind::Backing,
            Self::Challenge(_) => BallotKind::Challenge,
            Self::TokenVote(_) => BallotKind::TokenVote,
        }
    }

    pub fn account(&self) -> &AccountAddress {
        match self {
            Self::Backing(stake) | Self::Challenge(stake) => &stake.creator,
            Self::TokenVote(vote) => &vote.voter,
        }
    }

    /// Backings always support and challenges always oppose; token votes
    /// carry the voter's choice.
    pub fn stance(&self) -> Stance {
        match self {
            Self::Backing(_) => Stance::Supports,
            Self::Challenge(_) => Stance::Opposes,
            Self::TokenVote(vote) => vote.stance,
        }
    }

    /// Project onto the common `{kind, account, weight}` shape.
    pub fn weighted(&self, weight: u128) -> WeightedVote {
        WeightedVote {
            kind: self.kind(),
            account: self.account().clone(),
            weight,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallotKind {
    Backing,
    Challenge,
    TokenVote,
}

/// One ballot after weighting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedVote {
    pub kind: BallotKind,
    pub account: AccountAddress,
    pub weight: u128,
}

/// All weighted ballots on one side of a claim.
///
/// An account weighted under several ballot kinds counts once per ballot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedSet {
    votes: Vec<WeightedVote>,
    total: u128,
}

impl WeightedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vote. Returns `None` if the running total would overflow.
    pub fn push(&mut self, vote: WeightedVote) -> Option<()> {
        self.total = self.total.checked_add(vote.weight)?;
        self.votes.push(vote);
        Some(())
    }

    pub fn total(&self) -> u128 {
        self.total
    }

    pub fn votes(&self) -> &[WeightedVote] {
        &self.votes
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}

/// Result of resolving a tally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Confirmed,
    Rejected,
}

impl Outcome {
    pub fn resolution_state(&self) -> ResolutionState {
        match self {
            Self::Confirmed => ResolutionState::Confirmed,
            Self::Rejected => ResolutionState::Rejected,
        }
    }

    /// The stance whose stakes won.
    pub fn winning_stance(&self) -> Stance {
        match self {
            Self::Confirmed => Stance::Supports,
            Self::Rejected => Stance::Opposes,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.resolution_state(), f)
    }
}

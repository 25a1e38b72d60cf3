//! Stakes, token votes, and the arguments upvotes point at.

use crate::address::AccountAddress;
use crate::claim::ClaimId;
use crate::coin::Coin;
use crate::error::TypesError;
use crate::params::SettlementParams;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Unique identifier for a stake.
pub type StakeId = u64;

/// Unique identifier for an argument.
pub type ArgumentId = u64;

/// Unique identifier for a token vote.
pub type VoteId = u64;

/// What a stake was locked for.
///
/// Persisted as a one-byte code. New kinds may be added by later ledger
/// versions, so consumers must handle codes they do not know.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[non_exhaustive]
pub enum StakeKind {
    /// Locked in support of a claim.
    Backing,
    /// Locked against a claim.
    Challenge,
    /// Locked behind another account's argument.
    Upvote,
}

impl StakeKind {
    pub fn code(&self) -> u8 {
        match self {
            Self::Backing => 0,
            Self::Challenge => 1,
            Self::Upvote => 2,
        }
    }

    /// The side of the claim this kind of stake counts for in a tally.
    pub fn stance(&self) -> Stance {
        match self {
            Self::Backing | Self::Upvote => Stance::Supports,
            Self::Challenge => Stance::Opposes,
        }
    }
}

impl TryFrom<u8> for StakeKind {
    type Error = TypesError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Backing),
            1 => Ok(Self::Challenge),
            2 => Ok(Self::Upvote),
            other => Err(TypesError::UnknownStakeKind(other)),
        }
    }
}

impl From<StakeKind> for u8 {
    fn from(kind: StakeKind) -> Self {
        kind.code()
    }
}

impl fmt::Display for StakeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Backing => "backing",
            Self::Challenge => "challenge",
            Self::Upvote => "upvote",
        };
        f.write_str(s)
    }
}

/// Which side of a claim a ballot counts for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stance {
    Supports,
    Opposes,
}

/// Funds locked by an account against a claim or argument.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stake {
    pub id: StakeId,
    pub creator: AccountAddress,
    pub claim_id: ClaimId,
    /// Set for stakes placed on an argument (always for upvotes).
    pub argument_id: Option<ArgumentId>,
    pub amount: Coin,
    pub kind: StakeKind,
    pub created_at: Timestamp,
    pub end_time: Timestamp,
}

impl Stake {
    /// How long the principal is locked.
    pub fn holding_period(&self) -> Duration {
        self.end_time.saturating_duration_since(self.created_at)
    }

    pub fn is_matured(&self, now: Timestamp) -> bool {
        self.end_time.has_passed(now)
    }

    /// Structural checks applied when stakes enter the ledger.
    pub fn validate(&self, params: &SettlementParams) -> Result<(), TypesError> {
        let invalid = |reason: String| TypesError::InvalidStake {
            id: self.id,
            reason,
        };
        if self.amount.is_zero() {
            return Err(invalid("amount is zero".into()));
        }
        if self.amount.denom != params.stake_denom {
            return Err(invalid(format!(
                "amount denominated in {}, expected {}",
                self.amount.denom, params.stake_denom
            )));
        }
        if self.end_time < self.created_at {
            return Err(invalid("ends before it starts".into()));
        }
        let period = self.holding_period();
        if period < params.min_stake_period() || period > params.max_stake_period() {
            return Err(invalid(format!(
                "holding period {}s outside [{}s, {}s]",
                period.as_secs(),
                params.min_stake_period_secs,
                params.max_stake_period_secs
            )));
        }
        if self.kind == StakeKind::Upvote && self.argument_id.is_none() {
            return Err(invalid("upvote without an argument".into()));
        }
        Ok(())
    }
}

/// A reasoned position on a claim that other accounts can upvote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub id: ArgumentId,
    pub claim_id: ClaimId,
    pub creator: AccountAddress,
}

/// A token vote on a claim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub voter: AccountAddress,
    pub claim_id: ClaimId,
    pub amount: Coin,
    pub stance: Stance,
    /// The voter's category-coin balance when the vote was cast. Kept for
    /// audit; the tally weighs votes by the balance at tally time.
    pub weight_basis: u128,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::Denom;

    const DAY: u64 = 24 * 3600;

    fn stake(kind: StakeKind, start: u64, end: u64) -> Stake {
        Stake {
            id: 7,
            creator: AccountAddress::new("vrty_staker"),
            claim_id: 1,
            argument_id: Some(3),
            amount: Coin::new(Denom::new("stake"), 1_000),
            kind,
            created_at: Timestamp::from_secs(start),
            end_time: Timestamp::from_secs(end),
        }
    }

    #[test]
    fn kind_codes_round_trip_and_reject_unknown() {
        for kind in [StakeKind::Backing, StakeKind::Challenge, StakeKind::Upvote] {
            assert_eq!(StakeKind::try_from(kind.code()).unwrap(), kind);
        }
        assert!(matches!(
            StakeKind::try_from(9),
            Err(TypesError::UnknownStakeKind(9))
        ));
    }

    #[test]
    fn unknown_kind_fails_to_decode() {
        let mut bytes = bincode::serialize(&stake(StakeKind::Backing, 0, DAY)).unwrap();
        // the kind byte precedes the two trailing u64 timestamps
        let pos = bytes.len() - 16 - 1;
        assert_eq!(bytes[pos], StakeKind::Backing.code());
        bytes[pos] = 200;
        assert!(bincode::deserialize::<Stake>(&bytes).is_err());
    }

    #[test]
    fn challenge_opposes_everything_else_supports() {
        assert_eq!(StakeKind::Backing.stance(), Stance::Supports);
        assert_eq!(StakeKind::Upvote.stance(), Stance::Supports);
        assert_eq!(StakeKind::Challenge.stance(), Stance::Opposes);
    }

    #[test]
    fn validate_enforces_period_bounds() {
        let params = SettlementParams::default();
        assert!(stake(StakeKind::Backing, 0, 7 * DAY).validate(&params).is_ok());
        assert!(stake(StakeKind::Backing, 0, 60).validate(&params).is_err());
        assert!(stake(StakeKind::Backing, 0, 400 * DAY).validate(&params).is_err());
    }

    #[test]
    fn validate_rejects_zero_and_foreign_denom() {
        let params = SettlementParams::default();
        let mut s = stake(StakeKind::Challenge, 0, 7 * DAY);
        s.amount = Coin::zero(Denom::new("stake"));
        assert!(s.validate(&params).is_err());
        s.amount = Coin::new(Denom::new("crypto"), 10);
        assert!(s.validate(&params).is_err());
    }

    #[test]
    fn upvote_needs_argument() {
        let params = SettlementParams::default();
        let mut s = stake(StakeKind::Upvote, 0, 7 * DAY);
        s.argument_id = None;
        assert!(s.validate(&params).is_err());
    }
}

//! Records of what a tick moved, returned to the host for event emission.

use serde::{Deserialize, Serialize};
use verity_types::{AccountAddress, ClaimId, Coin, Outcome, StakeId, Timestamp, TransactionType};

/// One ledger credit made during settlement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub stake_id: StakeId,
    pub account: AccountAddress,
    pub coin: Coin,
    pub tx_type: TransactionType,
}

/// Interest paid for one matured argument stake.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RewardResult {
    /// The argument creator staked on their own argument and keeps it all.
    ArgumentCreation {
        argument_creator: AccountAddress,
        argument_creator_reward: Coin,
    },
    /// An upvote: interest split between the argument creator and the staker.
    UpvoteSplit {
        argument_creator: AccountAddress,
        argument_creator_reward: Coin,
        stake_creator: AccountAddress,
        stake_creator_reward: Coin,
    },
}

impl RewardResult {
    /// Total interest paid.
    pub fn total(&self) -> u128 {
        match self {
            Self::ArgumentCreation {
                argument_creator_reward,
                ..
            } => argument_creator_reward.amount,
            Self::UpvoteSplit {
                argument_creator_reward,
                stake_creator_reward,
                ..
            } => argument_creator_reward.amount + stake_creator_reward.amount,
        }
    }
}

/// Everything that happened when one expired claim was settled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSettlement {
    pub claim_id: ClaimId,
    pub outcome: Outcome,
    pub supports: u128,
    pub opposes: u128,
    pub refunds: Vec<Payout>,
    pub interest: Vec<Payout>,
    pub reward_pool: Coin,
}

/// A matured argument stake: principal back plus its interest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakePayout {
    pub stake_id: StakeId,
    pub refund: Payout,
    pub reward: RewardResult,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub now: Timestamp,
    pub claims: Vec<ClaimSettlement>,
    pub stakes: Vec<StakePayout>,
}

impl TickReport {
    pub fn new(now: Timestamp) -> Self {
        Self {
            now,
            claims: Vec::new(),
            stakes: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty() && self.stakes.is_empty()
    }

    /// Principal returned across both walkers.
    pub fn total_refunded(&self) -> u128 {
        let claims: u128 = self
            .claims
            .iter()
            .flat_map(|c| &c.refunds)
            .map(|p| p.coin.amount)
            .sum();
        let stakes: u128 = self.stakes.iter().map(|s| s.refund.coin.amount).sum();
        claims + stakes
    }

    /// Interest paid across both walkers.
    pub fn total_interest(&self) -> u128 {
        let claims: u128 = self
            .claims
            .iter()
            .flat_map(|c| &c.interest)
            .map(|p| p.coin.amount)
            .sum();
        let stakes: u128 = self.stakes.iter().map(|s| s.reward.total()).sum();
        claims + stakes
    }
}

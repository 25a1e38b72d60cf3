//! Reward distribution: principal refunds and interest payouts.

use crate::error::SettlementError;
use crate::event::{Payout, RewardResult, StakePayout};
use crate::interest::{split_reward, ExpirationInterest, StakingInterest};
use verity_store::{ClaimStore, Ledger, StakeStore};
use verity_types::{
    AccountAddress, Ballot, Claim, Coin, Outcome, SettlementParams, Stake, StakeKind, Timestamp, TransactionType,
};

/// Moves principal and interest to stake holders and argument creators.
pub struct RewardDistributor<'a> {
    pub ledger: &'a dyn Ledger,
    pub claims: &'a dyn ClaimStore,
    pub stakes: &'a dyn StakeStore,
}

/// Credits made while settling one claim's stakes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClaimPayouts {
    pub refunds: Vec<Payout>,
    pub interest: Vec<Payout>,
}

impl<'a> RewardDistributor<'a> {
    /// Refund every backing and challenge stake in `ballots` and pay
    /// expiration interest, in the claim's category denom, to the stakes on
    /// the winning side. Token votes lock nothing here and are skipped.
    pub fn settle_claim_stakes(
        &self,
        claim: &Claim,
        ballots: &[Ballot],
        outcome: Outcome,
        params: &SettlementParams,
        now: Timestamp,
    ) -> Result<ClaimPayouts, SettlementError> {
        let calculator = ExpirationInterest::from_params(params);
        let max_period = claim.validation_period();
        let mut payouts = ClaimPayouts::default();

        for ballot in ballots {
            let stake = match ballot {
                Ballot::Backing(stake) | Ballot::Challenge(stake) => stake,
                Ballot::TokenVote(_) => continue,
            };
            if !stake.is_matured(now) {
                return Err(SettlementError::StakeNotMatured {
                    stake_id: stake.id,
                    end_time: stake.end_time,
                    now,
                });
            }
            let tx_type = match stake.kind {
                StakeKind::Backing => TransactionType::BackingReturned,
                StakeKind::Challenge => TransactionType::ChallengeReturned,
                _ => return Err(SettlementError::UnknownStakeType(stake.id)),
            };
            payouts
                .refunds
                .push(self.credit(stake, &stake.creator, &stake.amount, claim.id, tx_type)?);

            if stake.kind.stance() == outcome.winning_stance() {
                let held = claim.expires_at.saturating_duration_since(stake.created_at);
                let interest =
                    calculator.interest(&stake.amount, held, max_period, &claim.category_denom)?;
                payouts.interest.push(self.credit(
                    stake,
                    &stake.creator,
                    &interest,
                    claim.id,
                    TransactionType::InterestEarned,
                )?);
            }
        }
        Ok(payouts)
    }

    /// Refund a matured argument stake and pay its staking interest.
    ///
    /// An argument creator staking on their own argument keeps all of the
    /// interest; an upvote splits it with the argument creator.
    pub fn distribute_reward(
        &self,
        stake: &Stake,
        params: &SettlementParams,
    ) -> Result<StakePayout, SettlementError> {
        let argument_id = stake
            .argument_id
            .ok_or(SettlementError::MissingArgument(stake.id))?;
        let argument = self
            .stakes
            .get_argument(argument_id)?
            .ok_or(SettlementError::UnknownArgument(argument_id))?;
        let claim = self
            .claims
            .get_claim(argument.claim_id)?
            .ok_or(SettlementError::UnknownClaim(argument.claim_id))?;

        let (refund_type, reference_id) = match stake.kind {
            StakeKind::Backing => (TransactionType::BackingReturned, argument.id),
            StakeKind::Challenge => (TransactionType::ChallengeReturned, argument.id),
            StakeKind::Upvote => (TransactionType::UpvoteReturned, stake.id),
            _ => return Err(SettlementError::UnknownStakeType(stake.id)),
        };
        let refund = self.credit(stake, &stake.creator, &stake.amount, reference_id, refund_type)?;

        let interest = StakingInterest::from_params(params).interest(
            &stake.amount,
            stake.holding_period(),
            &params.reward_denom,
        )?;
        let total = interest.amount;

        let reward = if argument.creator == stake.creator {
            self.credit(
                stake,
                &argument.creator,
                &interest,
                argument.id,
                TransactionType::InterestArgumentCreation,
            )?;
            self.stakes
                .add_earned_coin(&argument.creator, &claim.community_id, interest.amount)?;
            RewardResult::ArgumentCreation {
                argument_creator: argument.creator,
                argument_creator_reward: interest,
            }
        } else {
            let (creator_amount, staker_amount) =
                split_reward(interest.amount, params.creator_share)?;
            let creator_reward = Coin::new(params.reward_denom.clone(), creator_amount);
            let staker_reward = Coin::new(params.reward_denom.clone(), staker_amount);
            self.credit(
                stake,
                &argument.creator,
                &creator_reward,
                stake.id,
                TransactionType::InterestUpvoteReceived,
            )?;
            self.credit(
                stake,
                &stake.creator,
                &staker_reward,
                stake.id,
                TransactionType::InterestUpvoteGiven,
            )?;
            self.stakes
                .add_earned_coin(&argument.creator, &claim.community_id, creator_amount)?;
            self.stakes
                .add_earned_coin(&stake.creator, &claim.community_id, staker_amount)?;
            RewardResult::UpvoteSplit {
                argument_creator: argument.creator,
                argument_creator_reward: creator_reward,
                stake_creator: stake.creator.clone(),
                stake_creator_reward: staker_reward,
            }
        };

        tracing::debug!(
            stake_id = stake.id,
            argument_id = argument.id,
            interest = total,
            "argument stake rewarded"
        );
        Ok(StakePayout {
            stake_id: stake.id,
            refund,
            reward,
        })
    }

    fn credit(
        &self,
        stake: &Stake,
        account: &AccountAddress,
        coin: &Coin,
        reference_id: u64,
        tx_type: TransactionType,
    ) -> Result<Payout, SettlementError> {
        self.ledger.add_coin(account, coin, reference_id, tx_type)?;
        tracing::debug!(
            stake_id = stake.id,
            account = %account,
            coin = %coin,
            tx_type = %tx_type,
            "credited"
        );
        Ok(Payout {
            stake_id: stake.id,
            account: account.clone(),
            coin: coin.clone(),
            tx_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use verity_nullables::{NullClaimStore, NullLedger, NullStakeStore};
    use verity_types::{Argument, Denom, ResolutionState};

    const DAY: u64 = 24 * 3600;

    fn addr(name: &str) -> AccountAddress {
        AccountAddress::new(format!("vrty_{name}"))
    }

    struct Fixture {
        ledger: NullLedger,
        claims: NullClaimStore,
        stakes: NullStakeStore,
    }

    impl Fixture {
        fn new() -> Self {
            let claims = NullClaimStore::new();
            claims.insert(Claim {
                id: 1,
                creator: addr("carol"),
                community_id: "science".into(),
                category_denom: Denom::new("physics"),
                created_at: Timestamp::from_secs(0),
                expires_at: Timestamp::from_secs(10 * DAY),
                state: ResolutionState::Pending,
            });
            let stakes = NullStakeStore::new();
            stakes.insert_argument(Argument {
                id: 5,
                claim_id: 1,
                creator: addr("arthur"),
            });
            Self {
                ledger: NullLedger::new(),
                claims,
                stakes,
            }
        }

        fn distributor(&self) -> RewardDistributor<'_> {
            RewardDistributor {
                ledger: &self.ledger,
                claims: &self.claims,
                stakes: &self.stakes,
            }
        }
    }

    fn argument_stake(id: u64, who: &str, kind: StakeKind, amount: u128, days: u64) -> Stake {
        Stake {
            id,
            creator: addr(who),
            claim_id: 1,
            argument_id: Some(5),
            amount: Coin::new(Denom::new("stake"), amount),
            kind,
            created_at: Timestamp::from_secs(0),
            end_time: Timestamp::from_secs(days * DAY),
        }
    }

    #[test]
    fn self_stake_keeps_all_interest() {
        let fx = Fixture::new();
        let params = SettlementParams::default();
        let stake = argument_stake(9, "arthur", StakeKind::Backing, 1_000, 73);
        let payout = fx.distributor().distribute_reward(&stake, &params).unwrap();

        assert_eq!(payout.refund.tx_type, TransactionType::BackingReturned);
        assert_eq!(
            payout.reward,
            RewardResult::ArgumentCreation {
                argument_creator: addr("arthur"),
                argument_creator_reward: Coin::new(Denom::new("reward"), 20),
            }
        );
        let journal = fx.ledger.journal();
        assert_eq!(journal.len(), 2);
        assert_eq!(journal[0].reference_id, Some(5));
        assert_eq!(journal[1].tx_type, Some(TransactionType::InterestArgumentCreation));
        assert_eq!(journal[1].reference_id, Some(5));
        assert_eq!(fx.stakes.earned(&addr("arthur"), "science"), 20);
    }

    #[test]
    fn upvote_splits_interest() {
        let fx = Fixture::new();
        let mut params = SettlementParams::default();
        params.annual_interest_rate = dec!(0.101);
        // 0.101 × 1 year × 1000 = 101, split 50 / 51 at 0.5
        let stake = argument_stake(9, "uma", StakeKind::Upvote, 1_000, 365);
        let payout = fx.distributor().distribute_reward(&stake, &params).unwrap();

        assert_eq!(payout.refund.tx_type, TransactionType::UpvoteReturned);
        assert_eq!(payout.reward.total(), 101);
        match &payout.reward {
            RewardResult::UpvoteSplit {
                argument_creator_reward,
                stake_creator_reward,
                ..
            } => {
                assert_eq!(argument_creator_reward.amount, 50);
                assert_eq!(stake_creator_reward.amount, 51);
            }
            other => panic!("expected a split, got {other:?}"),
        }
        let journal = fx.ledger.journal();
        assert_eq!(journal[0].reference_id, Some(9));
        assert_eq!(fx.ledger.credited(TransactionType::InterestUpvoteReceived), 50);
        assert_eq!(fx.ledger.credited(TransactionType::InterestUpvoteGiven), 51);
        assert_eq!(fx.stakes.earned(&addr("arthur"), "science"), 50);
        assert_eq!(fx.stakes.earned(&addr("uma"), "science"), 51);
    }

    #[test]
    fn challenge_refund_references_argument() {
        let fx = Fixture::new();
        let stake = argument_stake(9, "uma", StakeKind::Challenge, 1_000, 30);
        let payout = fx
            .distributor()
            .distribute_reward(&stake, &SettlementParams::default())
            .unwrap();
        assert_eq!(payout.refund.tx_type, TransactionType::ChallengeReturned);
        assert_eq!(fx.ledger.journal()[0].reference_id, Some(5));
        assert_eq!(fx.ledger.credited(TransactionType::ChallengeReturned), 1_000);
    }

    #[test]
    fn unknown_argument_moves_nothing() {
        let fx = Fixture::new();
        let mut stake = argument_stake(9, "uma", StakeKind::Upvote, 1_000, 30);
        stake.argument_id = Some(77);
        let result = fx.distributor().distribute_reward(&stake, &SettlementParams::default());
        assert!(matches!(result, Err(SettlementError::UnknownArgument(77))));
        assert!(fx.ledger.journal().is_empty());
    }

    #[test]
    fn argument_on_unknown_claim_is_rejected() {
        let fx = Fixture::new();
        fx.stakes.insert_argument(Argument {
            id: 6,
            claim_id: 42,
            creator: addr("arthur"),
        });
        let mut stake = argument_stake(9, "uma", StakeKind::Upvote, 1_000, 30);
        stake.argument_id = Some(6);
        let result = fx.distributor().distribute_reward(&stake, &SettlementParams::default());
        assert!(matches!(result, Err(SettlementError::UnknownClaim(42))));
    }

    #[test]
    fn stake_without_argument_is_rejected() {
        let fx = Fixture::new();
        let mut stake = argument_stake(9, "uma", StakeKind::Backing, 1_000, 30);
        stake.argument_id = None;
        let result = fx.distributor().distribute_reward(&stake, &SettlementParams::default());
        assert!(matches!(result, Err(SettlementError::MissingArgument(9))));
    }

    #[test]
    fn claim_stakes_refund_all_and_pay_winners() {
        let fx = Fixture::new();
        let claim = fx.claims.get_claim(1).unwrap().unwrap();
        let mut backing = argument_stake(1, "alice", StakeKind::Backing, 1_000, 10);
        backing.argument_id = None;
        let mut challenge = argument_stake(2, "bob", StakeKind::Challenge, 400, 10);
        challenge.argument_id = None;
        let ballots = vec![Ballot::Backing(backing), Ballot::Challenge(challenge)];

        let payouts = fx
            .distributor()
            .settle_claim_stakes(
                &claim,
                &ballots,
                Outcome::Confirmed,
                &SettlementParams::default(),
                Timestamp::from_secs(10 * DAY),
            )
            .unwrap();

        assert_eq!(payouts.refunds.len(), 2);
        assert_eq!(payouts.interest.len(), 1);
        assert_eq!(payouts.interest[0].account, addr("alice"));
        // full window: rate ≈ 0.05
        assert_eq!(payouts.interest[0].coin, Coin::new(Denom::new("physics"), 50));
        assert!(fx.ledger.journal().iter().all(|e| e.reference_id == Some(1)));
    }

    #[test]
    fn immature_claim_stake_is_an_error() {
        let fx = Fixture::new();
        let claim = fx.claims.get_claim(1).unwrap().unwrap();
        let backing = argument_stake(1, "alice", StakeKind::Backing, 1_000, 20);
        let result = fx.distributor().settle_claim_stakes(
            &claim,
            &[Ballot::Backing(backing)],
            Outcome::Confirmed,
            &SettlementParams::default(),
            Timestamp::from_secs(10 * DAY),
        );
        assert!(matches!(result, Err(SettlementError::StakeNotMatured { stake_id: 1, .. })));
    }
}

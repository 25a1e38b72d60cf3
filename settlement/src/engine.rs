//! The end-of-tick settlement engine.

use crate::distributor::RewardDistributor;
use crate::error::SettlementError;
use crate::event::{ClaimSettlement, StakePayout, TickReport};
use crate::resolver::resolve;
use crate::tally::{collect_ballots, tally};
use crate::walker::drain;
use verity_store::{
    ClaimStore, ExpirationQueue, Ledger, ParamStore, QueueKind, RewardPool, StakeStore,
};
use verity_types::{Claim, SettlementParams, Stake, Timestamp};

/// Everything the engine reads or writes, borrowed from the host ledger.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub ledger: &'a dyn Ledger,
    pub claims: &'a dyn ClaimStore,
    pub stakes: &'a dyn StakeStore,
    pub params: &'a dyn ParamStore,
    pub pool: &'a dyn RewardPool,
    pub claim_queue: &'a dyn ExpirationQueue,
    pub stake_queue: &'a dyn ExpirationQueue,
}

/// Settles expired claims and matured argument stakes once per tick.
///
/// The engine holds no state of its own between ticks. It is the sole writer
/// while a tick runs and must not be re-entered. When a tick returns an error
/// the host must discard every write the tick made.
pub struct SettlementEngine<'a> {
    deps: Collaborators<'a>,
}

impl<'a> SettlementEngine<'a> {
    pub fn new(deps: Collaborators<'a>) -> Self {
        Self { deps }
    }

    /// Drain the claim expiration queue, then the stake expiration queue.
    ///
    /// # Panics
    ///
    /// If either queue is out of deadline order or names an unknown id.
    pub fn run_end_of_tick_settlement(&self, now: Timestamp) -> Result<TickReport, SettlementError> {
        let span = tracing::info_span!("settlement_tick", now = %now);
        let _enter = span.enter();

        let params = self.deps.params.get_params()?;
        let mut report = TickReport::new(now);

        report.claims = drain(
            QueueKind::ClaimExpiration,
            self.deps.claim_queue,
            now,
            |id| Ok(self.deps.claims.get_claim(id)?),
            |claim: &Claim| claim.expires_at,
            |claim| self.settle_claim(&claim, &params, now),
        )?;
        report.stakes = drain(
            QueueKind::StakeExpiration,
            self.deps.stake_queue,
            now,
            |id| Ok(self.deps.stakes.get_stake(id)?),
            |stake: &Stake| stake.end_time,
            |stake| self.distribute_reward(&stake, &params),
        )?;

        if !report.is_empty() {
            tracing::info!(
                claims = report.claims.len(),
                stakes = report.stakes.len(),
                refunded = report.total_refunded(),
                interest = report.total_interest(),
                "tick settled"
            );
        }
        Ok(report)
    }

    /// Run one tick, discarding the report.
    pub fn run_tick(&self, now: Timestamp) -> Result<(), SettlementError> {
        self.run_end_of_tick_settlement(now).map(|_| ())
    }

    /// Tally, resolve, and pay out one expired claim, then size and hand
    /// over its reward pool and record the outcome.
    pub fn settle_claim(
        &self,
        claim: &Claim,
        params: &SettlementParams,
        now: Timestamp,
    ) -> Result<ClaimSettlement, SettlementError> {
        let span = tracing::info_span!("settle_claim", claim_id = claim.id);
        let _enter = span.enter();

        if claim.state.is_terminal() {
            return Err(SettlementError::AlreadyResolved(claim.id));
        }

        let ballots = collect_ballots(claim, self.deps.stakes)?;
        let tally = tally(claim, &ballots, self.deps.ledger)?;
        let outcome = resolve(&tally.supports, &tally.opposes);

        let payouts = self
            .distributor()
            .settle_claim_stakes(claim, &ballots, outcome, params, now)?;

        let reward_pool = self
            .deps
            .pool
            .reward_pool(outcome, &tally.supports, &tally.opposes)?;
        self.deps
            .pool
            .distribute(&reward_pool, outcome, &tally.supports, &tally.opposes)?;
        self.deps
            .claims
            .set_resolution_state(claim.id, outcome.resolution_state())?;

        tracing::info!(
            claim_id = claim.id,
            outcome = %outcome,
            supports = tally.supports.total(),
            opposes = tally.opposes.total(),
            refunds = payouts.refunds.len(),
            pool = %reward_pool,
            "claim settled"
        );

        Ok(ClaimSettlement {
            claim_id: claim.id,
            outcome,
            supports: tally.supports.total(),
            opposes: tally.opposes.total(),
            refunds: payouts.refunds,
            interest: payouts.interest,
            reward_pool,
        })
    }

    /// Refund a matured argument stake and pay its staking interest.
    pub fn distribute_reward(
        &self,
        stake: &Stake,
        params: &SettlementParams,
    ) -> Result<StakePayout, SettlementError> {
        let span = tracing::info_span!("distribute_reward", stake_id = stake.id);
        let _enter = span.enter();
        self.distributor().distribute_reward(stake, params)
    }

    fn distributor(&self) -> RewardDistributor<'a> {
        RewardDistributor {
            ledger: self.deps.ledger,
            claims: self.deps.claims,
            stakes: self.deps.stakes,
        }
    }
}

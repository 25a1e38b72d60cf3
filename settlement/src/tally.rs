//! Vote tally: weigh every ballot on a claim into supports and opposes.

use crate::error::SettlementError;
use verity_store::{Ledger, StakeStore};
use verity_types::{Ballot, Claim, Stake, Stance, WeightedSet};

/// Weighted totals on both sides of a claim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub supports: WeightedSet,
    pub opposes: WeightedSet,
}

/// Gather the claim's backings, challenges, and token votes, in that order.
///
/// Stakes placed on an argument are settled from the stake queue and never
/// become ballots here.
pub fn collect_ballots(claim: &Claim, stakes: &dyn StakeStore) -> Result<Vec<Ballot>, SettlementError> {
    let on_claim = |stake: &Stake| stake.argument_id.is_none();
    let mut ballots: Vec<Ballot> = stakes
        .stakes_by_claim(claim.id)?
        .into_iter()
        .filter(on_claim)
        .map(Ballot::Backing)
        .collect();
    ballots.extend(
        stakes
            .challenges_by_claim(claim.id)?
            .into_iter()
            .filter(on_claim)
            .map(Ballot::Challenge),
    );
    ballots.extend(stakes.token_votes_by_claim(claim.id)?.into_iter().map(Ballot::TokenVote));
    Ok(ballots)
}

/// Weigh each ballot by its account's balance in the claim's category denom,
/// read now. Accounts appearing on several ballots count once per ballot.
pub fn tally(claim: &Claim, ballots: &[Ballot], ledger: &dyn Ledger) -> Result<Tally, SettlementError> {
    let mut tally = Tally::default();
    for ballot in ballots {
        let weight = ledger.balance_of(ballot.account(), &claim.category_denom)?;
        let side = match ballot.stance() {
            Stance::Supports => &mut tally.supports,
            Stance::Opposes => &mut tally.opposes,
        };
        side.push(ballot.weighted(weight))
            .ok_or(SettlementError::ArithmeticOverflow("tally weight"))?;
    }
    Ok(tally)
}

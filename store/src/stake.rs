//! Stake, argument, and token-vote lookup capability.

use crate::StoreError;
use verity_types::{AccountAddress, Argument, ArgumentId, ClaimId, Stake, StakeId, Vote};

pub trait StakeStore {
    fn get_argument(&self, id: ArgumentId) -> Result<Option<Argument>, StoreError>;

    fn get_stake(&self, id: StakeId) -> Result<Option<Stake>, StoreError>;

    /// Backing stakes placed directly on a claim, in creation order.
    /// Stakes on one of the claim's arguments are not included.
    fn stakes_by_claim(&self, claim_id: ClaimId) -> Result<Vec<Stake>, StoreError>;

    /// Challenge stakes placed directly on a claim, in creation order.
    /// Stakes on one of the claim's arguments are not included.
    fn challenges_by_claim(&self, claim_id: ClaimId) -> Result<Vec<Stake>, StoreError>;

    /// Token votes on a claim, in creation order.
    fn token_votes_by_claim(&self, claim_id: ClaimId) -> Result<Vec<Vote>, StoreError>;

    /// Record interest an account earned inside a community.
    fn add_earned_coin(
        &self,
        account: &AccountAddress,
        community_id: &str,
        amount: u128,
    ) -> Result<(), StoreError>;
}

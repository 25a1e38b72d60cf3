//! Reward pool capability.
//!
//! How the pool is sized and split for confirmed versus rejected claims is
//! owned by the bank module. The settlement engine only sequences the calls:
//! size the pool, then distribute it, once per claim.

use crate::StoreError;
use verity_types::{Coin, Outcome, WeightedSet};

pub trait RewardPool {
    fn reward_pool(
        &self,
        outcome: Outcome,
        supports: &WeightedSet,
        opposes: &WeightedSet,
    ) -> Result<Coin, StoreError>;

    fn distribute(
        &self,
        pool: &Coin,
        outcome: Outcome,
        supports: &WeightedSet,
        opposes: &WeightedSet,
    ) -> Result<(), StoreError>;
}

//! Nullable reward pool: records how the engine sequenced pool calls.

use std::sync::Mutex;
use verity_store::{RewardPool, StoreError};
use verity_types::{Coin, Outcome, WeightedSet};

/// A pool call observed by [`NullRewardPool`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolCall {
    Sized {
        outcome: Outcome,
        supports: u128,
        opposes: u128,
    },
    Distributed {
        pool: Coin,
        outcome: Outcome,
    },
}

/// A reward pool that always sizes to a fixed coin and distributes nothing.
pub struct NullRewardPool {
    pool: Coin,
    calls: Mutex<Vec<PoolCall>>,
    fail_distribution: Mutex<bool>,
}

impl NullRewardPool {
    pub fn new(pool: Coin) -> Self {
        Self {
            pool,
            calls: Mutex::new(Vec::new()),
            fail_distribution: Mutex::new(false),
        }
    }

    pub fn fail_distribution(&self) {
        *self.fail_distribution.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<PoolCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl RewardPool for NullRewardPool {
    fn reward_pool(
        &self,
        outcome: Outcome,
        supports: &WeightedSet,
        opposes: &WeightedSet,
    ) -> Result<Coin, StoreError> {
        self.calls.lock().unwrap().push(PoolCall::Sized {
            outcome,
            supports: supports.total(),
            opposes: opposes.total(),
        });
        Ok(self.pool.clone())
    }

    fn distribute(
        &self,
        pool: &Coin,
        outcome: Outcome,
        _supports: &WeightedSet,
        _opposes: &WeightedSet,
    ) -> Result<(), StoreError> {
        if *self.fail_distribution.lock().unwrap() {
            return Err(StoreError::Backend("reward pool distribution failed".into()));
        }
        self.calls.lock().unwrap().push(PoolCall::Distributed {
            pool: pool.clone(),
            outcome,
        });
        Ok(())
    }
}

//! End-of-tick settlement for the Verity claim-validation ledger.
//!
//! Each tick, [`SettlementEngine`] walks two deadline-ordered queues:
//!
//! 1. **Claim expiration**: every claim whose validation window closed is
//!    tallied ([`tally()`]), resolved ([`resolve()`]), has its backing and
//!    challenge principal refunded with expiration interest for the winning
//!    side, hands its reward pool to the bank, and becomes terminal.
//! 2. **Stake expiration**: every matured argument stake is refunded and
//!    paid continuous staking interest, split between the argument creator
//!    and the upvoter.
//!
//! All collaborators are narrow traits from `verity-store`; the engine owns
//! no storage. Domain failures are [`SettlementError`]s that abort the tick;
//! a corrupted queue panics.

pub mod distributor;
pub mod engine;
pub mod error;
pub mod event;
pub mod interest;
pub mod resolver;
pub mod tally;
pub mod walker;

pub use distributor::{ClaimPayouts, RewardDistributor};
pub use engine::{Collaborators, SettlementEngine};
pub use error::SettlementError;
pub use event::{ClaimSettlement, Payout, RewardResult, StakePayout, TickReport};
pub use interest::{split_reward, ExpirationInterest, StakingInterest, ONE_YEAR};
pub use resolver::resolve;
pub use tally::{collect_ballots, tally, Tally};

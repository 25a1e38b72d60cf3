//! Fundamental types for the Verity claim-validation ledger.
//!
//! This crate defines the types shared by every other crate in the workspace:
//! addresses, coins, timestamps, claims, stakes, tally sets, transaction tags,
//! and the settlement parameters.

pub mod address;
pub mod claim;
pub mod coin;
pub mod error;
pub mod params;
pub mod stake;
pub mod tally;
pub mod time;
pub mod transaction;

pub use address::AccountAddress;
pub use claim::{Claim, ClaimId, ResolutionState};
pub use coin::{Coin, Denom};
pub use error::TypesError;
pub use params::SettlementParams;
pub use stake::{Argument, ArgumentId, Stake, StakeId, StakeKind, Stance, Vote, VoteId};
pub use tally::{Ballot, BallotKind, Outcome, WeightedSet, WeightedVote};
pub use time::Timestamp;
pub use transaction::TransactionType;

//! Collaborator traits for the settlement engine.
//!
//! The engine never owns balances, claims, stakes, or queues. It drives them
//! through these narrow capabilities, each implemented by the host ledger
//! (in-memory for tests, LMDB for the persisted queues). Every method takes
//! `&self`; implementations are responsible for their own interior
//! mutability and must make each call succeed or fail atomically.

pub mod claim;
pub mod error;
pub mod ledger;
pub mod params;
pub mod pool;
pub mod queue;
pub mod stake;

pub use claim::ClaimStore;
pub use error::StoreError;
pub use ledger::Ledger;
pub use params::ParamStore;
pub use pool::RewardPool;
pub use queue::{ExpirationQueue, QueueKind};
pub use stake::StakeStore;

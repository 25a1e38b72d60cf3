//! Nullable collaborators for deterministic settlement tests.
//!
//! Every capability the settlement engine drives (ledger, claim and stake
//! stores, expiration queues, params, reward pool) has an in-memory
//! implementation here that:
//! - Returns deterministic values
//! - Can be seeded and inspected programmatically
//! - Never touches the filesystem
//!
//! [`NullWorld`] wires them together and loads or exports a
//! [`GenesisState`].

pub mod claim;
pub mod clock;
pub mod error;
pub mod genesis;
pub mod ledger;
pub mod params;
pub mod pool;
pub mod queue;
pub mod stake;

pub use claim::NullClaimStore;
pub use clock::NullClock;
pub use error::NullablesError;
pub use genesis::{GenesisBalance, GenesisEarning, GenesisState, NullWorld};
pub use ledger::{LedgerEntry, NullLedger};
pub use params::NullParamStore;
pub use pool::{NullRewardPool, PoolCall};
pub use queue::NullExpirationQueue;
pub use stake::NullStakeStore;

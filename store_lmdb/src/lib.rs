//! LMDB storage backend for Verity.
//!
//! Persists the two expiration queues and the settlement params in a single
//! `heed` environment. Balances, claims, and stakes live in the host ledger
//! and are not stored here.

pub mod environment;
pub mod error;
pub mod params;
pub mod queue;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use params::LmdbParamStore;
pub use queue::LmdbExpirationQueue;

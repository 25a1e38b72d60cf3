//! Expiration queue capability.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two deadline-ordered queues the ledger keeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueueKind {
    /// Claim ids ordered by claim expiration.
    ClaimExpiration,
    /// Argument stake ids ordered by stake end time.
    StakeExpiration,
}

impl QueueKind {
    /// Well-known store key the queue lives under.
    pub fn store_key(&self) -> &'static [u8] {
        match self {
            Self::ClaimExpiration => b"claim_expiration",
            Self::StakeExpiration => b"stake_expiration",
        }
    }
}

impl fmt::Display for QueueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ClaimExpiration => "claim_expiration",
            Self::StakeExpiration => "stake_expiration",
        };
        f.write_str(s)
    }
}

/// FIFO of ids. Writers push in non-decreasing deadline order, so the head
/// is always the next item due.
pub trait ExpirationQueue {
    fn push(&self, id: u64) -> Result<(), StoreError>;

    fn peek(&self) -> Result<Option<u64>, StoreError>;

    fn pop(&self) -> Result<Option<u64>, StoreError>;

    fn len(&self) -> Result<u64, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        self.len().map(|n| n == 0)
    }
}

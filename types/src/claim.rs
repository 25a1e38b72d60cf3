//! Claims and their resolution state.

use crate::address::AccountAddress;
use crate::coin::Denom;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Monotonically assigned claim identifier.
pub type ClaimId = u64;

/// Where a claim stands in its validation lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolutionState {
    /// Validation window still open (or closed but not yet settled).
    Pending,
    /// Supporting weight beat opposing weight at settlement.
    Confirmed,
    /// Opposing weight won, or the tally was a tie.
    Rejected,
}

impl ResolutionState {
    /// Confirmed and Rejected are terminal; a claim never leaves them.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for ResolutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// A statement submitted for community validation.
///
/// Claims are retained after settlement for audit; only `state` changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub creator: AccountAddress,
    /// Community (topic) the claim was filed under.
    pub community_id: String,
    /// The community's category coin. Tally weights and expiration interest
    /// are both denominated in it.
    pub category_denom: Denom,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub state: ResolutionState,
}

impl Claim {
    /// Length of the validation window, the reference period for interest.
    pub fn validation_period(&self) -> Duration {
        self.expires_at.saturating_duration_since(self.created_at)
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at.has_passed(now)
    }
}

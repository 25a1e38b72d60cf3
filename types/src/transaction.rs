//! Transaction tags attached to ledger credits so the account history can
//! attribute every coin movement made during settlement.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    BackingReturned,
    ChallengeReturned,
    UpvoteReturned,
    /// Expiration interest on a stake that ended on the winning side.
    InterestEarned,
    /// Full staking interest paid to an argument creator on their own stake.
    InterestArgumentCreation,
    /// Argument creator's share of an upvote's interest.
    InterestUpvoteReceived,
    /// Staker's share of an upvote's interest.
    InterestUpvoteGiven,
}

impl TransactionType {
    /// Principal refunds, as opposed to interest payouts.
    pub fn is_refund(&self) -> bool {
        matches!(
            self,
            Self::BackingReturned | Self::ChallengeReturned | Self::UpvoteReturned
        )
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::BackingReturned => "backing_returned",
            Self::ChallengeReturned => "challenge_returned",
            Self::UpvoteReturned => "upvote_returned",
            Self::InterestEarned => "interest_earned",
            Self::InterestArgumentCreation => "interest_argument_creation",
            Self::InterestUpvoteReceived => "interest_upvote_received",
            Self::InterestUpvoteGiven => "interest_upvote_given",
        };
        f.write_str(s)
    }
}

use thiserror::Error;
use verity_store::StoreError;
use verity_types::{ArgumentId, ClaimId, StakeId, Timestamp};

#[derive(Debug, Error)]
pub enum SettlementError {
    #[error("unknown claim {0}")]
    UnknownClaim(ClaimId),

    #[error("unknown argument {0}")]
    UnknownArgument(ArgumentId),

    #[error("stake {0} has no argument to reward")]
    MissingArgument(StakeId),

    #[error("stake {0} has an unknown stake type")]
    UnknownStakeType(StakeId),

    #[error("claim {0} is already resolved")]
    AlreadyResolved(ClaimId),

    #[error("stake {stake_id} ends at {end_time}, not matured at {now}")]
    StakeNotMatured {
        stake_id: StakeId,
        end_time: Timestamp,
        now: Timestamp,
    },

    #[error("arithmetic overflow in {0}")]
    ArithmeticOverflow(&'static str),

    #[error("ledger error: {0}")]
    Store(#[from] StoreError),
}

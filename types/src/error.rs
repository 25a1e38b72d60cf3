//! Top-level error type shared across crates.

use thiserror::Error;

/// Errors raised while building or validating core types.
#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    #[error("invalid denomination: {0:?}")]
    InvalidDenom(String),

    #[error("unknown stake kind code: {0}")]
    UnknownStakeKind(u8),

    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("invalid stake {id}: {reason}")]
    InvalidStake { id: u64, reason: String },

    #[error("params parse error: {0}")]
    ParamsParse(String),
}

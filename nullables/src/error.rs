use thiserror::Error;
use verity_types::TypesError;

#[derive(Debug, Error)]
pub enum NullablesError {
    #[error("invalid genesis: {0}")]
    InvalidGenesis(String),

    #[error("duplicate {kind} id {id} in genesis")]
    DuplicateId { kind: &'static str, id: u64 },

    #[error(transparent)]
    Types(#[from] TypesError),
}

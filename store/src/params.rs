//! Read-only parameter capability.

use crate::StoreError;
use verity_types::SettlementParams;

pub trait ParamStore {
    fn get_params(&self) -> Result<SettlementParams, StoreError>;
}

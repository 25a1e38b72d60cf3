//! Nullable param store.

use std::sync::Mutex;
use verity_store::{ParamStore, StoreError};
use verity_types::SettlementParams;

pub struct NullParamStore {
    params: Mutex<SettlementParams>,
}

impl NullParamStore {
    pub fn new(params: SettlementParams) -> Self {
        Self {
            params: Mutex::new(params),
        }
    }

    pub fn set(&self, params: SettlementParams) {
        *self.params.lock().unwrap() = params;
    }

    pub fn current(&self) -> SettlementParams {
        self.params.lock().unwrap().clone()
    }
}

impl Default for NullParamStore {
    fn default() -> Self {
        Self::new(SettlementParams::default())
    }
}

impl ParamStore for NullParamStore {
    fn get_params(&self) -> Result<SettlementParams, StoreError> {
        Ok(self.params.lock().unwrap().clone())
    }
}

//! LMDB implementation of ParamStore.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use verity_store::{ParamStore, StoreError};
use verity_types::SettlementParams;

use crate::LmdbError;

const PARAMS_KEY: &[u8] = b"settlement_params";

pub struct LmdbParamStore {
    pub(crate) env: Arc<Env>,
    pub(crate) meta_db: Database<Bytes, Bytes>,
}

impl LmdbParamStore {
    /// Replace the stored params. Only genesis and governance call this.
    pub fn put_params(&self, params: &SettlementParams) -> Result<(), StoreError> {
        let bytes = bincode::serialize(params).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.meta_db
            .put(&mut wtxn, PARAMS_KEY, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        tracing::info!(?params, "stored settlement params");
        Ok(())
    }
}

impl ParamStore for LmdbParamStore {
    fn get_params(&self) -> Result<SettlementParams, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let bytes = self
            .meta_db
            .get(&rtxn, PARAMS_KEY)
            .map_err(LmdbError::from)?
            .ok_or_else(|| LmdbError::NotFound("settlement params".to_string()))?;
        let params: SettlementParams = bincode::deserialize(bytes).map_err(LmdbError::from)?;
        Ok(params)
    }
}

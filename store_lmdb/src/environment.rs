//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};
use verity_store::QueueKind;

use crate::params::LmdbParamStore;
use crate::queue::LmdbExpirationQueue;
use crate::LmdbError;

const QUEUES_DB: &str = "expiration_queues";
const META_DB: &str = "meta";

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    queues_db: Database<Bytes, Bytes>,
    meta_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Default map size: 1 GiB is far beyond what two id queues need.
    pub const DEFAULT_MAP_SIZE: usize = 1 << 30;

    /// Open or create an LMDB environment at the given directory.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per process per path and
        // never memory-mapped by anything else.
        let env = unsafe { EnvOpenOptions::new().map_size(map_size).max_dbs(4).open(path)? };

        let mut wtxn = env.write_txn()?;
        let queues_db = env.create_database(&mut wtxn, Some(QUEUES_DB))?;
        let meta_db = env.create_database(&mut wtxn, Some(META_DB))?;
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), "opened LMDB environment");
        Ok(Self {
            env: Arc::new(env),
            queues_db,
            meta_db,
        })
    }

    /// Handle to one of the persisted expiration queues.
    pub fn expiration_queue(&self, kind: QueueKind) -> LmdbExpirationQueue {
        LmdbExpirationQueue {
            env: Arc::clone(&self.env),
            queues_db: self.queues_db,
            kind,
        }
    }

    pub fn param_store(&self) -> LmdbParamStore {
        LmdbParamStore {
            env: Arc::clone(&self.env),
            meta_db: self.meta_db,
        }
    }
}

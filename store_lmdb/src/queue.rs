//! LMDB implementation of ExpirationQueue.
//!
//! Key format: `queue.store_key() ++ sequence.to_be_bytes()`. Big-endian
//! sequence numbers make LMDB's lexicographic order equal to push order, so
//! the first key under the prefix is always the head. Values are the queued
//! id as 8 big-endian bytes.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use verity_store::{ExpirationQueue, QueueKind, StoreError};

use crate::LmdbError;

pub struct LmdbExpirationQueue {
    pub(crate) env: Arc<Env>,
    pub(crate) queues_db: Database<Bytes, Bytes>,
    pub(crate) kind: QueueKind,
}

fn entry_key(prefix: &[u8], seq: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(prefix.len() + 8);
    key.extend_from_slice(prefix);
    key.extend_from_slice(&seq.to_be_bytes());
    key
}

fn decode_u64(bytes: &[u8], what: &str) -> Result<u64, LmdbError> {
    let tail: [u8; 8] = bytes
        .get(bytes.len().saturating_sub(8)..)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| LmdbError::Corruption(format!("{what} has {} bytes", bytes.len())))?;
    Ok(u64::from_be_bytes(tail))
}

impl LmdbExpirationQueue {
    pub fn kind(&self) -> QueueKind {
        self.kind
    }

    /// Queued ids, head first.
    pub fn ids(&self) -> Result<Vec<u64>, StoreError> {
        Ok(self.ids_inner()?)
    }

    /// Replace the whole queue with `ids` in one transaction.
    pub fn replace(&self, ids: &[u64]) -> Result<(), StoreError> {
        Ok(self.replace_inner(ids)?)
    }

    fn ids_inner(&self) -> Result<Vec<u64>, LmdbError> {
        let rtxn = self.env.read_txn()?;
        let mut ids = Vec::new();
        for entry in self.queues_db.prefix_iter(&rtxn, self.kind.store_key())? {
            let (_, value) = entry?;
            ids.push(decode_u64(value, "queue value")?);
        }
        Ok(ids)
    }

    fn replace_inner(&self, ids: &[u64]) -> Result<(), LmdbError> {
        let prefix = self.kind.store_key();
        let mut wtxn = self.env.write_txn()?;
        let mut stale = Vec::new();
        for entry in self.queues_db.prefix_iter(&wtxn, prefix)? {
            let (key, _) = entry?;
            stale.push(key.to_vec());
        }
        for key in &stale {
            self.queues_db.delete(&mut wtxn, key)?;
        }
        for (seq, id) in ids.iter().enumerate() {
            self.queues_db
                .put(&mut wtxn, &entry_key(prefix, seq as u64), &id.to_be_bytes())?;
        }
        wtxn.commit()?;
        tracing::debug!(queue = %self.kind, replaced = stale.len(), len = ids.len(), "replaced queue");
        Ok(())
    }

    fn push_inner(&self, id: u64) -> Result<(), LmdbError> {
        let prefix = self.kind.store_key();
        let mut wtxn = self.env.write_txn()?;
        let next_seq = match self.queues_db.rev_prefix_iter(&wtxn, prefix)?.next() {
            Some(entry) => {
                let (key, _) = entry?;
                decode_u64(key, "queue key")? + 1
            }
            None => 0,
        };
        self.queues_db
            .put(&mut wtxn, &entry_key(prefix, next_seq), &id.to_be_bytes())?;
        wtxn.commit()?;
        Ok(())
    }

    fn peek_inner(&self) -> Result<Option<u64>, LmdbError> {
        let rtxn = self.env.read_txn()?;
        let head = match self.queues_db.prefix_iter(&rtxn, self.kind.store_key())?.next() {
            Some(entry) => {
                let (_, value) = entry?;
                Some(decode_u64(value, "queue value")?)
            }
            None => None,
        };
        Ok(head)
    }

    fn pop_inner(&self) -> Result<Option<u64>, LmdbError> {
        let mut wtxn = self.env.write_txn()?;
        let head = match self.queues_db.prefix_iter(&wtxn, self.kind.store_key())?.next() {
            Some(entry) => {
                let (key, value) = entry?;
                Some((key.to_vec(), decode_u64(value, "queue value")?))
            }
            None => None,
        };
        let Some((key, id)) = head else {
            return Ok(None);
        };
        self.queues_db.delete(&mut wtxn, &key)?;
        wtxn.commit()?;
        Ok(Some(id))
    }

    fn len_inner(&self) -> Result<u64, LmdbError> {
        let rtxn = self.env.read_txn()?;
        let mut count = 0u64;
        for entry in self.queues_db.prefix_iter(&rtxn, self.kind.store_key())? {
            entry?;
            count += 1;
        }
        Ok(count)
    }
}

impl ExpirationQueue for LmdbExpirationQueue {
    fn push(&self, id: u64) -> Result<(), StoreError> {
        Ok(self.push_inner(id)?)
    }

    fn peek(&self) -> Result<Option<u64>, StoreError> {
        Ok(self.peek_inner()?)
    }

    fn pop(&self) -> Result<Option<u64>, StoreError> {
        let popped = self.pop_inner()?;
        if let Some(id) = popped {
            tracing::trace!(queue = %self.kind, id, "popped queue head");
        }
        Ok(popped)
    }

    fn len(&self) -> Result<u64, StoreError> {
        Ok(self.len_inner()?)
    }
}

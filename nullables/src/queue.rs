//! Nullable expiration queue.

use std::collections::VecDeque;
use std::sync::Mutex;
use verity_store::{ExpirationQueue, StoreError};

#[derive(Default)]
pub struct NullExpirationQueue {
    items: Mutex<VecDeque<u64>>,
}

impl NullExpirationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            items: Mutex::new(ids.into_iter().collect()),
        }
    }

    /// Snapshot of the queue, head first.
    pub fn ids(&self) -> Vec<u64> {
        self.items.lock().unwrap().iter().copied().collect()
    }
}

impl ExpirationQueue for NullExpirationQueue {
    fn push(&self, id: u64) -> Result<(), StoreError> {
        self.items.lock().unwrap().push_back(id);
        Ok(())
    }

    fn peek(&self) -> Result<Option<u64>, StoreError> {
        Ok(self.items.lock().unwrap().front().copied())
    }

    fn pop(&self) -> Result<Option<u64>, StoreError> {
        Ok(self.items.lock().unwrap().pop_front())
    }

    fn len(&self) -> Result<u64, StoreError> {
        Ok(self.items.lock().unwrap().len() as u64)
    }
}

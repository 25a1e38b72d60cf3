//! Expiration queue walker.
//!
//! Drains a deadline-ordered queue within one tick: settle the head while
//! its deadline has passed, stop at the first head that is still pending.
//! Every settlement error aborts the walk and is returned as is.

use crate::error::SettlementError;
use verity_store::{ExpirationQueue, QueueKind};
use verity_types::Timestamp;

/// Walk `queue` at `now`.
///
/// `lookup` resolves a queued id to its item; `deadline` says when the item
/// is due; `settle` consumes it after it has been popped.
///
/// # Panics
///
/// If the queue names an id `lookup` cannot find, or a head is due earlier
/// than the head settled before it. Both mean the queue writer broke the
/// ordering contract.
pub fn drain<T, R>(
    kind: QueueKind,
    queue: &dyn ExpirationQueue,
    now: Timestamp,
    lookup: impl Fn(u64) -> Result<Option<T>, SettlementError>,
    deadline: impl Fn(&T) -> Timestamp,
    mut settle: impl FnMut(T) -> Result<R, SettlementError>,
) -> Result<Vec<R>, SettlementError> {
    let mut settled = Vec::new();
    let mut previous: Option<Timestamp> = None;

    while let Some(id) = queue.peek()? {
        let Some(item) = lookup(id)? else {
            panic!("{kind} queue names unknown id {id}");
        };
        let due = deadline(&item);
        if let Some(previous) = previous {
            if due < previous {
                panic!("{kind} queue out of order: {id} due at {due}, after an item due at {previous}");
            }
        }
        if !due.has_passed(now) {
            tracing::trace!(queue = %kind, id, due = %due, "head not yet due");
            break;
        }

        match queue.pop()? {
            Some(popped) if popped == id => {}
            other => panic!("{kind} queue head changed under the walker: peeked {id}, popped {other:?}"),
        }
        previous = Some(due);
        settled.push(settle(item)?);
    }

    Ok(settled)
}

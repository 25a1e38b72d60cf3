//! Outcome resolution.

use verity_types::{Outcome, WeightedSet};

/// Confirmed only on a strict majority of weight; a tie is a rejection.
pub fn resolve(supports: &WeightedSet, opposes: &WeightedSet) -> Outcome {
    if supports.total() > opposes.total() {
        Outcome::Confirmed
    } else {
        Outcome::Rejected
    }
}

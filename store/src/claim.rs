//! Claim lookup and resolution capability.

use crate::StoreError;
use verity_types::{Claim, ClaimId, ResolutionState};

pub trait ClaimStore {
    fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, StoreError>;

    /// Move a pending claim to a terminal state. Implementations must
    /// reject any transition out of a terminal state.
    fn set_resolution_state(&self, id: ClaimId, state: ResolutionState) -> Result<(), StoreError>;
}

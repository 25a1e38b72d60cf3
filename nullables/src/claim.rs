//! Nullable claim store.

use std::collections::BTreeMap;
use std::sync::Mutex;
use verity_store::{ClaimStore, StoreError};
use verity_types::{Claim, ClaimId, ResolutionState};

#[derive(Default)]
pub struct NullClaimStore {
    claims: Mutex<BTreeMap<ClaimId, Claim>>,
}

impl NullClaimStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, claim: Claim) {
        self.claims.lock().unwrap().insert(claim.id, claim);
    }

    pub fn claims(&self) -> Vec<Claim> {
        self.claims.lock().unwrap().values().cloned().collect()
    }
}

impl ClaimStore for NullClaimStore {
    fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, StoreError> {
        Ok(self.claims.lock().unwrap().get(&id).cloned())
    }

    fn set_resolution_state(&self, id: ClaimId, state: ResolutionState) -> Result<(), StoreError> {
        let mut claims = self.claims.lock().unwrap();
        let claim = claims
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("claim {id}")))?;
        if claim.state.is_terminal() || !state.is_terminal() {
            return Err(StoreError::InvalidTransition(format!(
                "claim {id}: {} -> {state}",
                claim.state
            )));
        }
        claim.state = state;
        Ok(())
    }
}

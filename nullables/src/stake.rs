//! Nullable stake store: stakes, arguments, token votes, earnings.

use std::collections::BTreeMap;
use std::sync::Mutex;
use verity_store::{StakeStore, StoreError};
use verity_types::{
    AccountAddress, Argument, ArgumentId, ClaimId, Stake, StakeId, StakeKind, Vote, VoteId,
};

#[derive(Default)]
pub struct NullStakeStore {
    arguments: Mutex<BTreeMap<ArgumentId, Argument>>,
    stakes: Mutex<BTreeMap<StakeId, Stake>>,
    votes: Mutex<BTreeMap<VoteId, Vote>>,
    earned: Mutex<BTreeMap<(AccountAddress, String), u128>>,
}

impl NullStakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_argument(&self, argument: Argument) {
        self.arguments.lock().unwrap().insert(argument.id, argument);
    }

    pub fn insert_stake(&self, stake: Stake) {
        self.stakes.lock().unwrap().insert(stake.id, stake);
    }

    pub fn insert_vote(&self, vote: Vote) {
        self.votes.lock().unwrap().insert(vote.id, vote);
    }

    pub fn arguments(&self) -> Vec<Argument> {
        self.arguments.lock().unwrap().values().cloned().collect()
    }

    pub fn stakes(&self) -> Vec<Stake> {
        self.stakes.lock().unwrap().values().cloned().collect()
    }

    pub fn votes(&self) -> Vec<Vote> {
        self.votes.lock().unwrap().values().cloned().collect()
    }

    /// Seed an earnings record without going through the store interface.
    pub fn record_earning(&self, account: &AccountAddress, community_id: &str, amount: u128) {
        self.earned
            .lock()
            .unwrap()
            .insert((account.clone(), community_id.to_string()), amount);
    }

    /// Interest recorded for `account` within `community_id`.
    pub fn earned(&self, account: &AccountAddress, community_id: &str) -> u128 {
        self.earned
            .lock()
            .unwrap()
            .get(&(account.clone(), community_id.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn earnings(&self) -> Vec<(AccountAddress, String, u128)> {
        self.earned
            .lock()
            .unwrap()
            .iter()
            .map(|((account, community), amount)| (account.clone(), community.clone(), *amount))
            .collect()
    }

    fn claim_stakes(&self, claim_id: ClaimId, kind: StakeKind) -> Vec<Stake> {
        self.stakes
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.claim_id == claim_id && s.argument_id.is_none() && s.kind == kind)
            .cloned()
            .collect()
    }
}

impl StakeStore for NullStakeStore {
    fn get_argument(&self, id: ArgumentId) -> Result<Option<Argument>, StoreError> {
        Ok(self.arguments.lock().unwrap().get(&id).cloned())
    }

    fn get_stake(&self, id: StakeId) -> Result<Option<Stake>, StoreError> {
        Ok(self.stakes.lock().unwrap().get(&id).cloned())
    }

    fn stakes_by_claim(&self, claim_id: ClaimId) -> Result<Vec<Stake>, StoreError> {
        Ok(self.claim_stakes(claim_id, StakeKind::Backing))
    }

    fn challenges_by_claim(&self, claim_id: ClaimId) -> Result<Vec<Stake>, StoreError> {
        Ok(self.claim_stakes(claim_id, StakeKind::Challenge))
    }

    fn token_votes_by_claim(&self, claim_id: ClaimId) -> Result<Vec<Vote>, StoreError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .values()
            .filter(|v| v.claim_id == claim_id)
            .cloned()
            .collect())
    }

    fn add_earned_coin(
        &self,
        account: &AccountAddress,
        community_id: &str,
        amount: u128,
    ) -> Result<(), StoreError> {
        let mut earned = self.earned.lock().unwrap();
        let entry = earned
            .entry((account.clone(), community_id.to_string()))
            .or_insert(0);
        *entry = entry
            .checked_add(amount)
            .ok_or_else(|| StoreError::Overflow(account.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verity_types::{Coin, Denom, Timestamp};

    fn stake(id: StakeId, kind: StakeKind) -> Stake {
        Stake {
            id,
            creator: AccountAddress::new("vrty_alice"),
            claim_id: 1,
            argument_id: None,
            amount: Coin::new(Denom::new("stake"), 100),
            kind,
            created_at: Timestamp::from_secs(0),
            end_time: Timestamp::from_secs(86_400),
        }
    }

    #[test]
    fn claim_lookups_filter_by_kind() {
        let store = NullStakeStore::new();
        store.insert_stake(stake(1, StakeKind::Backing));
        store.insert_stake(stake(2, StakeKind::Challenge));
        store.insert_stake(stake(3, StakeKind::Upvote));
        let backings = store.stakes_by_claim(1).unwrap();
        let challenges = store.challenges_by_claim(1).unwrap();
        assert_eq!(backings.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(challenges.iter().map(|s| s.id).collect::<Vec<_>>(), vec![2]);
        assert!(store.stakes_by_claim(2).unwrap().is_empty());
    }

    #[test]
    fn claim_lookups_skip_argument_stakes() {
        let store = NullStakeStore::new();
        store.insert_stake(stake(1, StakeKind::Backing));
        store.insert_stake(Stake {
            argument_id: Some(7),
            ..stake(2, StakeKind::Backing)
        });
        store.insert_stake(Stake {
            argument_id: Some(7),
            ..stake(3, StakeKind::Challenge)
        });
        let backings = store.stakes_by_claim(1).unwrap();
        assert_eq!(backings.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1]);
        assert!(store.challenges_by_claim(1).unwrap().is_empty());
    }

    #[test]
    fn earnings_accumulate_per_community() {
        let store = NullStakeStore::new();
        let alice = AccountAddress::new("vrty_alice");
        store.add_earned_coin(&alice, "science", 5).unwrap();
        store.add_earned_coin(&alice, "science", 7).unwrap();
        store.add_earned_coin(&alice, "arts", 1).unwrap();
        assert_eq!(store.earned(&alice, "science"), 12);
        assert_eq!(store.earned(&alice, "arts"), 1);
        assert_eq!(store.earned(&alice, "sports"), 0);
    }
}

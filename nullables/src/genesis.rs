//! Genesis import and export for an in-memory ledger world.
//!
//! A [`GenesisState`] is the serializable snapshot of everything the
//! settlement engine reads or writes. [`NullWorld`] loads one into the
//! nullable collaborators and can export the result after a tick, with
//! every collection in a deterministic order.

use crate::claim::NullClaimStore;
use crate::error::NullablesError;
use crate::ledger::NullLedger;
use crate::params::NullParamStore;
use crate::pool::NullRewardPool;
use crate::queue::NullExpirationQueue;
use crate::stake::NullStakeStore;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use verity_store::Ledger;
use verity_types::{
    AccountAddress, Argument, Claim, ClaimId, Coin, SettlementParams, Stake, StakeId, Timestamp,
    Vote,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisBalance {
    pub address: AccountAddress,
    pub coins: Vec<Coin>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisEarning {
    pub address: AccountAddress,
    pub community_id: String,
    pub amount: u128,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisState {
    pub params: SettlementParams,
    pub balances: Vec<GenesisBalance>,
    pub claims: Vec<Claim>,
    pub arguments: Vec<Argument>,
    pub stakes: Vec<Stake>,
    pub votes: Vec<Vote>,
    pub earnings: Vec<GenesisEarning>,
    /// Claim ids, head first.
    pub claim_queue: Vec<ClaimId>,
    /// Argument stake ids, head first.
    pub stake_queue: Vec<StakeId>,
}

/// Every nullable collaborator the settlement engine needs, wired together.
pub struct NullWorld {
    pub ledger: NullLedger,
    pub claims: NullClaimStore,
    pub stakes: NullStakeStore,
    pub params: NullParamStore,
    pub pool: NullRewardPool,
    pub claim_queue: NullExpirationQueue,
    pub stake_queue: NullExpirationQueue,
}

impl NullWorld {
    /// An empty world with the given params and a reward pool that sizes to
    /// zero.
    pub fn new(params: SettlementParams) -> Self {
        let pool = NullRewardPool::new(Coin::zero(params.reward_denom.clone()));
        Self {
            ledger: NullLedger::new(),
            claims: NullClaimStore::new(),
            stakes: NullStakeStore::new(),
            params: NullParamStore::new(params),
            pool,
            claim_queue: NullExpirationQueue::new(),
            stake_queue: NullExpirationQueue::new(),
        }
    }

    /// Validate a genesis snapshot and load it.
    pub fn from_genesis(genesis: GenesisState) -> Result<Self, NullablesError> {
        genesis.params.validate()?;

        let claim_ids = unique_ids("claim", genesis.claims.iter().map(|c| c.id))?;
        let argument_ids = unique_ids("argument", genesis.arguments.iter().map(|a| a.id))?;
        let stake_ids = unique_ids("stake", genesis.stakes.iter().map(|s| s.id))?;
        unique_ids("vote", genesis.votes.iter().map(|v| v.id))?;

        for argument in &genesis.arguments {
            if !claim_ids.contains(&argument.claim_id) {
                return Err(NullablesError::InvalidGenesis(format!(
                    "argument {} references unknown claim {}",
                    argument.id, argument.claim_id
                )));
            }
        }
        let expiries: BTreeMap<ClaimId, Timestamp> = genesis
            .claims
            .iter()
            .map(|c| (c.id, c.expires_at))
            .collect();
        for stake in &genesis.stakes {
            stake.validate(&genesis.params)?;
            let Some(expires_at) = expiries.get(&stake.claim_id) else {
                return Err(NullablesError::InvalidGenesis(format!(
                    "stake {} references unknown claim {}",
                    stake.id, stake.claim_id
                )));
            };
            match stake.argument_id {
                Some(argument_id) if !argument_ids.contains(&argument_id) => {
                    return Err(NullablesError::InvalidGenesis(format!(
                        "stake {} references unknown argument {argument_id}",
                        stake.id
                    )));
                }
                Some(_) => {}
                // settled with the claim, so it must be unlocked by then
                None if stake.end_time > *expires_at => {
                    return Err(NullablesError::InvalidGenesis(format!(
                        "stake {} ends at {} after claim {} expires at {expires_at}",
                        stake.id, stake.end_time, stake.claim_id
                    )));
                }
                None => {}
            }
        }
        for vote in &genesis.votes {
            if !claim_ids.contains(&vote.claim_id) {
                return Err(NullablesError::InvalidGenesis(format!(
                    "vote {} references unknown claim {}",
                    vote.id, vote.claim_id
                )));
            }
        }
        for id in &genesis.claim_queue {
            if !claim_ids.contains(id) {
                return Err(NullablesError::InvalidGenesis(format!(
                    "claim queue names unknown claim {id}"
                )));
            }
        }
        let argument_stakes: BTreeSet<StakeId> = genesis
            .stakes
            .iter()
            .filter(|s| s.argument_id.is_some())
            .map(|s| s.id)
            .collect();
        for id in &genesis.stake_queue {
            if !stake_ids.contains(id) {
                return Err(NullablesError::InvalidGenesis(format!(
                    "stake queue names unknown stake {id}"
                )));
            }
            if !argument_stakes.contains(id) {
                return Err(NullablesError::InvalidGenesis(format!(
                    "stake queue names stake {id}, which is settled with its claim"
                )));
            }
        }

        let mut world = Self::new(genesis.params);
        for balance in &genesis.balances {
            world
                .ledger
                .add_coins(&balance.address, &balance.coins)
                .map_err(|e| NullablesError::InvalidGenesis(format!("{}: {e}", balance.address)))?;
        }
        for claim in genesis.claims {
            world.claims.insert(claim);
        }
        for argument in genesis.arguments {
            world.stakes.insert_argument(argument);
        }
        for stake in genesis.stakes {
            world.stakes.insert_stake(stake);
        }
        for vote in genesis.votes {
            world.stakes.insert_vote(vote);
        }
        for earning in genesis.earnings {
            world
                .stakes
                .record_earning(&earning.address, &earning.community_id, earning.amount);
        }
        world.claim_queue = NullExpirationQueue::from_ids(genesis.claim_queue);
        world.stake_queue = NullExpirationQueue::from_ids(genesis.stake_queue);
        Ok(world)
    }

    /// Snapshot the world. Collections are ordered by id (balances and
    /// earnings by account); queues keep their head-first order.
    pub fn export_genesis(&self) -> GenesisState {
        let mut balances: BTreeMap<AccountAddress, Vec<Coin>> = BTreeMap::new();
        for (address, coin) in self.ledger.balances() {
            balances.entry(address).or_default().push(coin);
        }
        GenesisState {
            params: self.params.current(),
            balances: balances
                .into_iter()
                .map(|(address, coins)| GenesisBalance { address, coins })
                .collect(),
            claims: self.claims.claims(),
            arguments: self.stakes.arguments(),
            stakes: self.stakes.stakes(),
            votes: self.stakes.votes(),
            earnings: self
                .stakes
                .earnings()
                .into_iter()
                .map(|(address, community_id, amount)| GenesisEarning {
                    address,
                    community_id,
                    amount,
                })
                .collect(),
            claim_queue: self.claim_queue.ids(),
            stake_queue: self.stake_queue.ids(),
        }
    }
}

fn unique_ids(
    kind: &'static str,
    ids: impl Iterator<Item = u64>,
) -> Result<BTreeSet<u64>, NullablesError> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(NullablesError::DuplicateId { kind, id });
        }
    }
    Ok(seen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use verity_types::{Denom, ResolutionState, StakeKind};

    const DAY: u64 = 24 * 3600;

    fn addr(name: &str) -> AccountAddress {
        AccountAddress::new(format!("vrty_{name}"))
    }

    fn sample() -> GenesisState {
        let claim = Claim {
            id: 1,
            creator: addr("carol"),
            community_id: "science".into(),
            category_denom: Denom::new("physics"),
            created_at: Timestamp::from_secs(0),
            expires_at: Timestamp::from_secs(7 * DAY),
            state: ResolutionState::Pending,
        };
        let stake = Stake {
            id: 10,
            creator: addr("alice"),
            claim_id: 1,
            argument_id: None,
            amount: Coin::new(Denom::new("stake"), 500),
            kind: StakeKind::Backing,
            created_at: Timestamp::from_secs(0),
            end_time: Timestamp::from_secs(7 * DAY),
        };
        GenesisState {
            balances: vec![GenesisBalance {
                address: addr("alice"),
                coins: vec![Coin::new(Denom::new("physics"), 40)],
            }],
            claims: vec![claim],
            stakes: vec![stake],
            claim_queue: vec![1],
            ..GenesisState::default()
        }
    }

    #[test]
    fn import_then_export_is_stable() {
        let genesis = sample();
        let world = NullWorld::from_genesis(genesis.clone()).unwrap();
        assert_eq!(world.export_genesis(), genesis);
    }

    #[test]
    fn genesis_parses_from_json_with_defaults() {
        let json = serde_json::to_string(&sample()).unwrap();
        let parsed: GenesisState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());

        let empty: GenesisState = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.params, SettlementParams::default());
        assert!(empty.claims.is_empty());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut genesis = sample();
        genesis.stakes.push(genesis.stakes[0].clone());
        assert!(matches!(
            NullWorld::from_genesis(genesis),
            Err(NullablesError::DuplicateId { kind: "stake", id: 10 })
        ));
    }

    #[test]
    fn rejects_invalid_stake() {
        let mut genesis = sample();
        genesis.stakes[0].end_time = Timestamp::from_secs(60);
        assert!(matches!(
            NullWorld::from_genesis(genesis),
            Err(NullablesError::Types(_))
        ));
    }

    #[test]
    fn rejects_claim_stake_outliving_its_claim() {
        let mut genesis = sample();
        genesis.stakes[0].end_time = Timestamp::from_secs(40 * DAY);
        let err = NullWorld::from_genesis(genesis).err().unwrap();
        assert!(matches!(err, NullablesError::InvalidGenesis(ref msg) if msg.contains("stake 10 ends")));
    }

    #[test]
    fn argument_stake_may_outlive_its_claim() {
        let mut genesis = sample();
        genesis.arguments.push(Argument {
            id: 20,
            claim_id: 1,
            creator: addr("arthur"),
        });
        genesis.stakes[0].argument_id = Some(20);
        genesis.stakes[0].end_time = Timestamp::from_secs(40 * DAY);
        genesis.stake_queue.push(10);
        assert!(NullWorld::from_genesis(genesis).is_ok());
    }

    #[test]
    fn rejects_claim_stake_in_stake_queue() {
        let mut genesis = sample();
        genesis.stake_queue.push(10);
        let err = NullWorld::from_genesis(genesis).err().unwrap();
        assert!(matches!(err, NullablesError::InvalidGenesis(ref msg) if msg.contains("settled with its claim")));
    }

    #[test]
    fn rejects_dangling_queue_entry() {
        let mut genesis = sample();
        genesis.stake_queue.push(99);
        assert!(matches!(
            NullWorld::from_genesis(genesis),
            Err(NullablesError::InvalidGenesis(_))
        ));
    }
}

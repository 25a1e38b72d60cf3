//! Nullable ledger: in-memory balances with a credit journal.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use verity_store::{Ledger, StoreError};
use verity_types::{AccountAddress, Coin, Denom, TransactionType};

/// One credit applied through the ledger interface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub account: AccountAddress,
    pub coin: Coin,
    pub reference_id: Option<u64>,
    pub tx_type: Option<TransactionType>,
}

/// An in-memory account ledger for testing.
///
/// Every credit is journaled in order so tests can check exactly which
/// coins moved where. Credits to accounts marked with [`NullLedger::fail_credits_to`]
/// fail without touching any balance.
#[derive(Default)]
pub struct NullLedger {
    balances: Mutex<BTreeMap<(AccountAddress, Denom), u128>>,
    journal: Mutex<Vec<LedgerEntry>>,
    failing: Mutex<BTreeSet<AccountAddress>>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a balance without journaling it.
    pub fn set_balance(&self, account: &AccountAddress, coin: Coin) {
        self.balances
            .lock()
            .unwrap()
            .insert((account.clone(), coin.denom), coin.amount);
    }

    /// Make every subsequent credit to `account` fail.
    pub fn fail_credits_to(&self, account: &AccountAddress) {
        self.failing.lock().unwrap().insert(account.clone());
    }

    pub fn journal(&self) -> Vec<LedgerEntry> {
        self.journal.lock().unwrap().clone()
    }

    /// All non-zero balances, ordered by account then denom.
    pub fn balances(&self) -> Vec<(AccountAddress, Coin)> {
        self.balances
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, amount)| **amount > 0)
            .map(|((account, denom), amount)| (account.clone(), Coin::new(denom.clone(), *amount)))
            .collect()
    }

    /// Sum of journaled credits matching `tx_type`.
    pub fn credited(&self, tx_type: TransactionType) -> u128 {
        self.journal
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.tx_type == Some(tx_type))
            .map(|e| e.coin.amount)
            .sum()
    }

    /// Apply credits all-or-nothing.
    fn credit(
        &self,
        account: &AccountAddress,
        coins: &[Coin],
        reference_id: Option<u64>,
        tx_type: Option<TransactionType>,
    ) -> Result<Vec<Coin>, StoreError> {
        if self.failing.lock().unwrap().contains(account) {
            return Err(StoreError::Backend(format!("credit to {account} rejected")));
        }
        let mut balances = self.balances.lock().unwrap();
        let mut staged = balances.clone();
        let mut new_balances = Vec::with_capacity(coins.len());
        for coin in coins {
            let balance = staged
                .entry((account.clone(), coin.denom.clone()))
                .or_insert(0);
            *balance = balance
                .checked_add(coin.amount)
                .ok_or_else(|| StoreError::Overflow(account.to_string()))?;
            new_balances.push(Coin::new(coin.denom.clone(), *balance));
        }
        *balances = staged;
        self.journal
            .lock()
            .unwrap()
            .extend(coins.iter().map(|coin| LedgerEntry {
                account: account.clone(),
                coin: coin.clone(),
                reference_id,
                tx_type,
            }));
        Ok(new_balances)
    }
}

impl Ledger for NullLedger {
    fn add_coins(&self, account: &AccountAddress, coins: &[Coin]) -> Result<Vec<Coin>, StoreError> {
        self.credit(account, coins, None, None)
    }

    fn add_coin(
        &self,
        account: &AccountAddress,
        coin: &Coin,
        reference_id: u64,
        tx_type: TransactionType,
    ) -> Result<Coin, StoreError> {
        let mut new_balances =
            self.credit(account, std::slice::from_ref(coin), Some(reference_id), Some(tx_type))?;
        new_balances
            .pop()
            .ok_or_else(|| StoreError::Backend("credit returned no balance".into()))
    }

    fn balance_of(&self, account: &AccountAddress, denom: &Denom) -> Result<u128, StoreError> {
        Ok(self
            .balances
            .lock()
            .unwrap()
            .get(&(account.clone(), denom.clone()))
            .copied()
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> AccountAddress {
        AccountAddress::new("vrty_alice")
    }

    #[test]
    fn credits_accumulate_and_journal() {
        let ledger = NullLedger::new();
        let stake = Denom::new("stake");
        ledger.set_balance(&alice(), Coin::new(stake.clone(), 10));
        let after = ledger
            .add_coin(&alice(), &Coin::new(stake.clone(), 5), 3, TransactionType::BackingReturned)
            .unwrap();
        assert_eq!(after.amount, 15);
        assert_eq!(ledger.balance_of(&alice(), &stake).unwrap(), 15);
        assert_eq!(ledger.journal().len(), 1);
        assert_eq!(ledger.credited(TransactionType::BackingReturned), 5);
    }

    #[test]
    fn overflowing_batch_applies_nothing() {
        let ledger = NullLedger::new();
        let stake = Denom::new("stake");
        let cred = Denom::new("cred");
        ledger.set_balance(&alice(), Coin::new(stake.clone(), u128::MAX));
        let result = ledger.add_coins(&alice(), &[Coin::new(cred.clone(), 1), Coin::new(stake, 1)]);
        assert!(matches!(result, Err(StoreError::Overflow(_))));
        assert_eq!(ledger.balance_of(&alice(), &cred).unwrap(), 0);
        assert!(ledger.journal().is_empty());
    }

    #[test]
    fn unknown_account_has_zero_balance() {
        let ledger = NullLedger::new();
        assert_eq!(ledger.balance_of(&alice(), &Denom::new("stake")).unwrap(), 0);
    }

    #[test]
    fn failing_account_is_untouched() {
        let ledger = NullLedger::new();
        ledger.fail_credits_to(&alice());
        let coin = Coin::new(Denom::new("stake"), 5);
        assert!(ledger.add_coins(&alice(), &[coin.clone()]).is_err());
        assert!(ledger
            .add_coin(&alice(), &coin, 1, TransactionType::UpvoteReturned)
            .is_err());
        assert!(ledger.journal().is_empty());
        assert!(ledger.balances().is_empty());
    }
}

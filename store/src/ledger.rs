//! Account balance capability.

use crate::StoreError;
use verity_types::{AccountAddress, Coin, Denom, TransactionType};

/// Balance reads and credits on the account ledger.
pub trait Ledger {
    /// Credit untagged coins. Returns the account's new balances for the
    /// credited denominations, in the order given.
    fn add_coins(&self, account: &AccountAddress, coins: &[Coin]) -> Result<Vec<Coin>, StoreError>;

    /// Credit one coin and record it in the account history under
    /// `reference_id` and `tx_type`. Returns the new balance.
    fn add_coin(
        &self,
        account: &AccountAddress,
        coin: &Coin,
        reference_id: u64,
        tx_type: TransactionType,
    ) -> Result<Coin, StoreError>;

    /// Current balance of `account` in `denom`; zero for unknown accounts.
    fn balance_of(&self, account: &AccountAddress, denom: &Denom) -> Result<u128, StoreError>;
}

//! Account address type with `vrty_` prefix.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A ledger account address, always prefixed with `vrty_`.
///
/// Address derivation and signature checks happen in the account subsystem;
/// the settlement engine only compares and displays addresses.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountAddress(String);

impl AccountAddress {
    /// The standard prefix for all Verity account addresses.
    pub const PREFIX: &'static str = "vrty_";

    /// Create a new address from a raw string.
    ///
    /// # Panics
    /// Panics if the string is not a well-formed address.
    pub fn new(raw: impl Into<String>) -> Self {
        match Self::parse(raw) {
            Ok(address) => address,
            Err(e) => panic!("{e}"),
        }
    }

    /// Parse an address, rejecting a missing prefix or an empty body.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        if !s.starts_with(Self::PREFIX) || s.len() == Self::PREFIX.len() {
            return Err(TypesError::InvalidAddress(s));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AccountAddress {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<AccountAddress> for String {
    fn from(address: AccountAddress) -> Self {
        address.0
    }
}

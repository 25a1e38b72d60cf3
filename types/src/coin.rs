//! Coin and denomination types.
//!
//! Amounts are fixed-point integers (u128) counted in the smallest unit of a
//! denomination. There is no floating point anywhere on the settlement path.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A coin denomination, e.g. `stake` or a community's category coin.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Denom(String);

impl Denom {
    pub const MIN_LEN: usize = 2;
    pub const MAX_LEN: usize = 32;

    /// Create a denomination.
    ///
    /// # Panics
    /// Panics if the name is not a valid denomination.
    pub fn new(raw: impl Into<String>) -> Self {
        match Self::parse(raw) {
            Ok(denom) => denom,
            Err(e) => panic!("{e}"),
        }
    }

    /// Parse a denomination: 2-32 chars of lowercase ASCII, digits or `-`,
    /// starting with a letter.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        let well_formed = (Self::MIN_LEN..=Self::MAX_LEN).contains(&s.len())
            && s.starts_with(|c: char| c.is_ascii_lowercase())
            && s
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !well_formed {
            return Err(TypesError::InvalidDenom(s));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Denom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Denom {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Denom> for String {
    fn from(denom: Denom) -> Self {
        denom.0
    }
}

/// An amount of a single denomination.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: Denom,
    pub amount: u128,
}

impl Coin {
    pub fn new(denom: Denom, amount: u128) -> Self {
        Self { denom, amount }
    }

    pub fn zero(denom: Denom) -> Self {
        Self { denom, amount: 0 }
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Add another coin of the same denomination.
    ///
    /// Returns `None` on a denomination mismatch or overflow.
    pub fn checked_add(&self, other: &Coin) -> Option<Coin> {
        if self.denom != other.denom {
            return None;
        }
        self.amount
            .checked_add(other.amount)
            .map(|amount| Coin::new(self.denom.clone(), amount))
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

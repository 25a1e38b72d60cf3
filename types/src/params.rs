//! Settlement parameters.
//!
//! Read-only during a tick. Governance and genesis are the only writers.
//! Rates and weights are exact decimals so every replica computes the same
//! interest bit-for-bit.

use crate::coin::Denom;
use crate::error::TypesError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementParams {
    // ── Denominations ────────────────────────────────────────────────────
    /// Denomination every stake principal is locked in.
    pub stake_denom: Denom,

    /// Denomination continuous staking interest is paid in.
    pub reward_denom: Denom,

    // ── Stake duration bounds ────────────────────────────────────────────
    pub min_stake_period_secs: u64,
    pub max_stake_period_secs: u64,

    // ── Expiration interest ──────────────────────────────────────────────
    /// Weight of the normalized stake amount in the interest rate.
    pub amount_weight: Decimal,

    /// Weight of the normalized holding period in the interest rate.
    pub period_weight: Decimal,

    /// Ceiling used to normalize stake amounts. A fixed stand-in for the
    /// circulating supply, which the ledger does not track yet.
    pub reference_supply_ceiling: u64,

    /// Rate reached when both normalized inputs are 1 and weights sum to 1.
    pub max_interest_rate: Decimal,

    /// Floor the computed rate is clamped up to.
    pub min_interest_rate: Decimal,

    // ── Continuous staking interest ──────────────────────────────────────
    /// Annual rate applied pro rata to matured argument stakes.
    pub annual_interest_rate: Decimal,

    /// Fraction of an upvote's interest paid to the argument creator.
    /// The staker receives the remainder.
    pub creator_share: Decimal,
}

impl SettlementParams {
    pub const DEFAULT_SUPPLY_CEILING: u64 = 1_000_000_000_000_000;

    pub fn min_stake_period(&self) -> Duration {
        Duration::from_secs(self.min_stake_period_secs)
    }

    pub fn max_stake_period(&self) -> Duration {
        Duration::from_secs(self.max_stake_period_secs)
    }

    /// Parse params from TOML. Missing keys take their default value; the
    /// result is validated before it is returned.
    pub fn from_toml_str(s: &str) -> Result<Self, TypesError> {
        let params: Self = toml::from_str(s).map_err(|e| TypesError::ParamsParse(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), TypesError> {
        let unit = |name: &str, v: Decimal| {
            if v < Decimal::ZERO || v > Decimal::ONE {
                Err(TypesError::InvalidParams(format!("{name} must be within [0, 1], got {v}")))
            } else {
                Ok(())
            }
        };
        unit("amount_weight", self.amount_weight)?;
        unit("period_weight", self.period_weight)?;
        unit("max_interest_rate", self.max_interest_rate)?;
        unit("min_interest_rate", self.min_interest_rate)?;
        unit("annual_interest_rate", self.annual_interest_rate)?;
        unit("creator_share", self.creator_share)?;

        if self.min_interest_rate > self.max_interest_rate {
            return Err(TypesError::InvalidParams(format!(
                "min_interest_rate {} exceeds max_interest_rate {}",
                self.min_interest_rate, self.max_interest_rate
            )));
        }
        if self.min_stake_period_secs > self.max_stake_period_secs {
            return Err(TypesError::InvalidParams(format!(
                "min_stake_period_secs {} exceeds max_stake_period_secs {}",
                self.min_stake_period_secs, self.max_stake_period_secs
            )));
        }
        if self.reference_supply_ceiling == 0 {
            return Err(TypesError::InvalidParams(
                "reference_supply_ceiling must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for SettlementParams {
    fn default() -> Self {
        Self {
            stake_denom: Denom::new("stake"),
            reward_denom: Denom::new("reward"),

            min_stake_period_secs: 24 * 3600,      // 1 day
            max_stake_period_secs: 365 * 24 * 3600, // 1 year

            amount_weight: dec!(0.5),
            period_weight: dec!(0.5),
            reference_supply_ceiling: Self::DEFAULT_SUPPLY_CEILING,
            max_interest_rate: dec!(0.10),
            min_interest_rate: dec!(0.02),

            annual_interest_rate: dec!(0.10),
            creator_share: dec!(0.5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        SettlementParams::default().validate().unwrap();
    }

    #[test]
    fn toml_overrides_only_given_keys() {
        let params = SettlementParams::from_toml_str(
            r#"
            creator_share = "0.25"
            max_stake_period_secs = 172800
            reward_denom = "cred"
            "#,
        )
        .unwrap();
        assert_eq!(params.creator_share, dec!(0.25));
        assert_eq!(params.max_stake_period_secs, 172_800);
        assert_eq!(params.reward_denom, Denom::new("cred"));
        assert_eq!(params.amount_weight, dec!(0.5));
    }

    #[test]
    fn rejects_inverted_rate_bounds() {
        let params = SettlementParams {
            min_interest_rate: dec!(0.2),
            max_interest_rate: dec!(0.1),
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(TypesError::InvalidParams(_))));
    }

    #[test]
    fn rejects_out_of_range_share() {
        let params = SettlementParams {
            creator_share: dec!(1.5),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn rejects_zero_ceiling_and_bad_denom() {
        let params = SettlementParams {
            reference_supply_ceiling: 0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
        assert!(SettlementParams::from_toml_str(r#"stake_denom = "X""#).is_err());
    }
}

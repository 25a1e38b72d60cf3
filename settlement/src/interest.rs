//! Interest strategies.
//!
//! Two distinct formulas price a locked stake:
//!
//! - [`ExpirationInterest`] pays stakes on the winning side of an expired
//!   claim. The rate grows with the stake's share of the reference supply
//!   and with how much of the claim's validation window it was locked for,
//!   and is clamped up to a floor.
//! - [`StakingInterest`] pays matured argument stakes pro rata to a fixed
//!   annual rate.
//!
//! All arithmetic is exact decimal and rounds half to even, so every replica
//! computes identical amounts.

use crate::error::SettlementError;
use rust_decimal::prelude::*;
use rust_decimal::RoundingStrategy;
use std::time::Duration;
use verity_types::{Coin, Denom, SettlementParams};

/// 365 days.
pub const ONE_YEAR: Duration = Duration::from_secs(365 * 24 * 3600);

/// Rate and interest on stakes settled when their claim expires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpirationInterest {
    pub amount_weight: Decimal,
    pub period_weight: Decimal,
    pub supply_ceiling: Decimal,
    pub max_rate: Decimal,
    pub min_rate: Decimal,
}

impl ExpirationInterest {
    pub fn from_params(params: &SettlementParams) -> Self {
        Self {
            amount_weight: params.amount_weight,
            period_weight: params.period_weight,
            supply_ceiling: Decimal::from(params.reference_supply_ceiling),
            max_rate: params.max_interest_rate,
            min_rate: params.min_interest_rate,
        }
    }

    /// Interest rate for `principal` held for `held` out of `max_period`.
    ///
    /// `max_rate × (amount/ceiling × amount_weight + held/max × period_weight)`,
    /// never below `min_rate`. A zero `max_period` normalizes the period to 0.
    pub fn rate(
        &self,
        principal: u128,
        held: Duration,
        max_period: Duration,
    ) -> Result<Decimal, SettlementError> {
        let overflow = || SettlementError::ArithmeticOverflow("expiration rate");

        let normalized_amount = decimal(principal)?
            .checked_div(self.supply_ceiling)
            .ok_or_else(overflow)?;
        let normalized_period = if max_period.is_zero() {
            Decimal::ZERO
        } else {
            decimal(held.as_nanos())?
                .checked_div(decimal(max_period.as_nanos())?)
                .ok_or_else(overflow)?
        };

        let weighted_amount = normalized_amount
            .checked_mul(self.amount_weight)
            .ok_or_else(overflow)?;
        let weighted_period = normalized_period
            .checked_mul(self.period_weight)
            .ok_or_else(overflow)?;
        let raw = weighted_amount
            .checked_add(weighted_period)
            .and_then(|weighted| self.max_rate.checked_mul(weighted))
            .ok_or_else(overflow)?;

        Ok(raw.max(self.min_rate))
    }

    /// Interest on `principal`, paid in `denom` and rounded to whole units.
    pub fn interest(
        &self,
        principal: &Coin,
        held: Duration,
        max_period: Duration,
        denom: &Denom,
    ) -> Result<Coin, SettlementError> {
        let rate = self.rate(principal.amount, held, max_period)?;
        let interest = decimal(principal.amount)?
            .checked_mul(rate)
            .ok_or(SettlementError::ArithmeticOverflow("expiration interest"))?;
        Ok(Coin::new(denom.clone(), round_units(interest)?))
    }
}

/// Pro-rata annual interest on matured argument stakes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StakingInterest {
    pub annual_rate: Decimal,
}

impl StakingInterest {
    pub fn from_params(params: &SettlementParams) -> Self {
        Self {
            annual_rate: params.annual_interest_rate,
        }
    }

    /// Unrounded `annual_rate × held/one_year × principal`.
    pub fn raw_interest(&self, principal: u128, held: Duration) -> Result<Decimal, SettlementError> {
        let overflow = || SettlementError::ArithmeticOverflow("staking interest");
        let fraction_of_year = decimal(held.as_nanos())?
            .checked_div(decimal(ONE_YEAR.as_nanos())?)
            .ok_or_else(overflow)?;
        self.annual_rate
            .checked_mul(fraction_of_year)
            .and_then(|rate| rate.checked_mul(Decimal::from_u128(principal)?))
            .ok_or_else(overflow)
    }

    /// Interest on `principal`, paid in `denom` and rounded to whole units.
    pub fn interest(
        &self,
        principal: &Coin,
        held: Duration,
        denom: &Denom,
    ) -> Result<Coin, SettlementError> {
        let raw = self.raw_interest(principal.amount, held)?;
        Ok(Coin::new(denom.clone(), round_units(raw)?))
    }
}

/// Split rounded interest between an argument creator and an upvoter.
///
/// The creator gets `round(total × creator_share)` and the staker the exact
/// remainder, so the two always sum to `total`.
pub fn split_reward(total: u128, creator_share: Decimal) -> Result<(u128, u128), SettlementError> {
    let creator = decimal(total)?
        .checked_mul(creator_share)
        .ok_or(SettlementError::ArithmeticOverflow("reward split"))?;
    let creator = round_units(creator)?.min(total);
    Ok((creator, total - creator))
}

fn decimal(n: u128) -> Result<Decimal, SettlementError> {
    Decimal::from_u128(n).ok_or(SettlementError::ArithmeticOverflow("decimal conversion"))
}

/// Round half to even and convert to whole units.
fn round_units(d: Decimal) -> Result<u128, SettlementError> {
    d.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .to_u128()
        .ok_or(SettlementError::ArithmeticOverflow("rounding"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const DAY: Duration = Duration::from_secs(24 * 3600);

    fn stake_coin(amount: u128) -> Coin {
        Coin::new(Denom::new("stake"), amount)
    }

    fn expiration() -> ExpirationInterest {
        ExpirationInterest::from_params(&SettlementParams::default())
    }

    #[test]
    fn zero_principal_zero_period_hits_floor() {
        let calc = expiration();
        let rate = calc.rate(0, Duration::ZERO, 7 * DAY).unwrap();
        assert_eq!(rate, dec!(0.02));
        let interest = calc
            .interest(&stake_coin(0), Duration::ZERO, 7 * DAY, &Denom::new("physics"))
            .unwrap();
        assert_eq!(interest, Coin::zero(Denom::new("physics")));
    }

    #[test]
    fn full_window_earns_weighted_max() {
        // period term 1 × 0.5, amount term negligible: rate 0.05 + tiny
        let calc = expiration();
        let rate = calc.rate(1_000, 10 * DAY, 10 * DAY).unwrap();
        assert!(rate > dec!(0.05) && rate < dec!(0.0500001));
        let interest = calc
            .interest(&stake_coin(1_000), 10 * DAY, 10 * DAY, &Denom::new("physics"))
            .unwrap();
        assert_eq!(interest.amount, 50);
    }

    #[test]
    fn whole_supply_for_whole_window_earns_max_rate() {
        let calc = expiration();
        let rate = calc
            .rate(SettlementParams::DEFAULT_SUPPLY_CEILING as u128, DAY, DAY)
            .unwrap();
        assert_eq!(rate, dec!(0.10));
    }

    #[test]
    fn half_window_is_clamped_only_below_floor() {
        let calc = expiration();
        // 0.1 × 0.5 × 0.5 = 0.025, above the floor
        assert_eq!(calc.rate(0, 5 * DAY, 10 * DAY).unwrap(), dec!(0.025));
        // 0.1 × 0.5 × 0.1 = 0.005, clamped to 0.02
        assert_eq!(calc.rate(0, DAY, 10 * DAY).unwrap(), dec!(0.02));
    }

    #[test]
    fn zero_max_period_normalizes_to_zero() {
        let calc = expiration();
        assert_eq!(calc.rate(0, DAY, Duration::ZERO).unwrap(), dec!(0.02));
    }

    #[test]
    fn staking_interest_is_pro_rata() {
        let calc = StakingInterest::from_params(&SettlementParams::default());
        // 73 days is exactly a fifth of a year: 0.10 × 0.2 × 1000
        let coin = calc
            .interest(&stake_coin(1_000), 73 * DAY, &Denom::new("reward"))
            .unwrap();
        assert_eq!(coin, Coin::new(Denom::new("reward"), 20));
        let year = calc.interest(&stake_coin(1_000), ONE_YEAR, &Denom::new("reward")).unwrap();
        assert_eq!(year.amount, 100);
    }

    #[test]
    fn staking_interest_rounds_half_to_even() {
        let calc = StakingInterest {
            annual_rate: dec!(0.5),
        };
        // 0.5 × 1 × 5 = 2.5 -> 2; 0.5 × 1 × 7 = 3.5 -> 4
        assert_eq!(calc.interest(&stake_coin(5), ONE_YEAR, &Denom::new("reward")).unwrap().amount, 2);
        assert_eq!(calc.interest(&stake_coin(7), ONE_YEAR, &Denom::new("reward")).unwrap().amount, 4);
    }

    #[test]
    fn split_conserves_total() {
        let (creator, staker) = split_reward(101, dec!(0.5)).unwrap();
        assert_eq!(creator, 50);
        assert_eq!(staker, 51);
        assert_eq!(split_reward(100, dec!(0.25)).unwrap(), (25, 75));
        assert_eq!(split_reward(9, Decimal::ONE).unwrap(), (9, 0));
        assert_eq!(split_reward(9, Decimal::ZERO).unwrap(), (0, 9));
    }
}

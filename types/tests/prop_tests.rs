use proptest::prelude::*;

use verity_types::{
    AccountAddress, BallotKind, Coin, Denom, StakeKind, Timestamp, WeightedSet, WeightedVote,
};

proptest! {
    /// Timestamp ordering: from_nanos(a) <= from_nanos(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::from_nanos(a);
        let tb = Timestamp::from_nanos(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// saturating_duration_since matches manual nanosecond arithmetic.
    #[test]
    fn timestamp_duration_since(base in 0u64..1_000_000_000_000, offset in 0u64..1_000_000_000_000) {
        let t = Timestamp::from_nanos(base);
        let later = Timestamp::from_nanos(base + offset);
        prop_assert_eq!(later.saturating_duration_since(t).as_nanos(), offset as u128);
        prop_assert_eq!(t.saturating_duration_since(later).as_nanos(), 0);
    }

    /// has_passed is exactly `now >= deadline`.
    #[test]
    fn deadline_has_passed(deadline in 0u64..u64::MAX, now in 0u64..u64::MAX) {
        prop_assert_eq!(
            Timestamp::from_nanos(deadline).has_passed(Timestamp::from_nanos(now)),
            now >= deadline
        );
    }

    /// Stake kind codes either decode to the kind that encodes to them or fail.
    #[test]
    fn stake_kind_codes(code in 0u8..=255) {
        match StakeKind::try_from(code) {
            Ok(kind) => prop_assert_eq!(kind.code(), code),
            Err(_) => prop_assert!(code > 2),
        }
    }

    /// Weighted set totals equal the sum of pushed weights.
    #[test]
    fn weighted_set_total(weights in prop::collection::vec(0u128..1_000_000_000_000, 0..50)) {
        let mut set = WeightedSet::new();
        for (i, w) in weights.iter().enumerate() {
            set.push(WeightedVote {
                kind: BallotKind::Backing,
                account: AccountAddress::new(format!("vrty_{i}")),
                weight: *w,
            }).unwrap();
        }
        prop_assert_eq!(set.total(), weights.iter().sum::<u128>());
        prop_assert_eq!(set.len(), weights.len());
    }

    /// Same-denom coin addition agrees with integer addition.
    #[test]
    fn coin_checked_add(a in 0u128..u128::MAX / 2, b in 0u128..u128::MAX / 2) {
        let denom = Denom::new("stake");
        let sum = Coin::new(denom.clone(), a).checked_add(&Coin::new(denom, b)).unwrap();
        prop_assert_eq!(sum.amount, a + b);
    }
}

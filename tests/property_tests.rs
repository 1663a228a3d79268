//! Property-based tests for the PnL math.
//!
//! These tests verify invariants hold under random inputs.

use leverage_ledger::*;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn price_strategy() -> impl Strategy<Value = u64> {
    1u64..1_000_000u64
}

fn amount_strategy() -> impl Strategy<Value = u64> {
    1u64..100_000u64
}

fn leverage_strategy() -> impl Strategy<Value = u32> {
    1u32..=100u32
}

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Long), Just(Side::Short)]
}

fn price(units: u64) -> Price {
    Price::from_units(units).unwrap()
}

proptest! {
    /// PnL is flat and not a profit when current = entry
    #[test]
    fn pnl_flat_at_entry(
        side in side_strategy(),
        amount in amount_strategy(),
        leverage in leverage_strategy(),
        entry in price_strategy(),
    ) {
        let pnl = calculate_pnl(side, amount, leverage, price(entry), price(entry)).unwrap();
        prop_assert_eq!(pnl, Pnl::flat());
    }

    /// Long profits exactly when price rises
    #[test]
    fn pnl_sign_long(
        amount in amount_strategy(),
        leverage in leverage_strategy(),
        entry in price_strategy(),
        current in price_strategy(),
    ) {
        let pnl = calculate_pnl(Side::Long, amount, leverage, price(entry), price(current)).unwrap();
        prop_assert_eq!(pnl.is_profit, current > entry);
        prop_assert_eq!(pnl.magnitude.is_zero(), current == entry);
    }

    /// Short is the mirror image of long on the same move
    #[test]
    fn short_mirrors_long(
        amount in amount_strategy(),
        leverage in leverage_strategy(),
        entry in price_strategy(),
        current in price_strategy(),
    ) {
        prop_assume!(entry != current);
        let long = calculate_pnl(Side::Long, amount, leverage, price(entry), price(current)).unwrap();
        let short = calculate_pnl(Side::Short, amount, leverage, price(entry), price(current)).unwrap();

        prop_assert_eq!(long.magnitude, short.magnitude);
        prop_assert_ne!(long.is_profit, short.is_profit);
        prop_assert_eq!(long.signed(), -short.signed());
    }

    /// Magnitude is amount * leverage * |delta|
    #[test]
    fn magnitude_formula(
        side in side_strategy(),
        amount in amount_strategy(),
        leverage in leverage_strategy(),
        entry in price_strategy(),
        current in price_strategy(),
    ) {
        let pnl = calculate_pnl(side, amount, leverage, price(entry), price(current)).unwrap();
        let delta = (i128::from(current) - i128::from(entry)).unsigned_abs();
        let expected = u128::from(amount) * u128::from(leverage) * delta;
        prop_assert_eq!(pnl.magnitude.value(), Decimal::from(u64::try_from(expected).unwrap()));
    }

    /// Payout never goes negative and never exceeds collateral on a loss
    #[test]
    fn payout_bounds(
        collateral in 0u64..10_000_000u64,
        magnitude in 0u64..20_000_000u64,
        is_profit in any::<bool>(),
    ) {
        let collateral = Quote::from_units(collateral);
        let pnl = Pnl { is_profit, magnitude: Quote::from_units(magnitude) };
        let payout = settlement_payout(collateral, pnl).unwrap();

        prop_assert!(!payout.is_negative());
        if is_profit {
            prop_assert!(payout >= collateral);
        } else {
            prop_assert!(payout <= collateral);
        }
    }
}

// 1.0: all the primitives live here. nothing in the ledger works without these types.
// IDs, pair tags, prices, balances, timestamps. each is a newtype so the compiler catches type mixups.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "acct#{}", self.0)
    }
}

// per-account sequence. the first trade of every account is TradeId(1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TradeId(pub u64);

impl TradeId {
    pub const FIRST: TradeId = TradeId(1);

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Long = profit when price goes up. Short = profit when price goes down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Long,
    Short,
}

impl Side {
    pub fn from_is_short(is_short: bool) -> Self {
        if is_short {
            Side::Short
        } else {
            Side::Long
        }
    }

    pub fn is_short(&self) -> bool {
        matches!(self, Side::Short)
    }

    pub fn opposite(&self) -> Self {
        match self {
            Side::Long => Side::Short,
            Side::Short => Side::Long,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Long => write!(f, "long"),
            Side::Short => write!(f, "short"),
        }
    }
}

// 1.1: fixed 32 byte pair tag. opaque to the ledger, only compared and displayed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairId([u8; 32]);

impl PairId {
    /// Longest symbol that still leaves a terminating zero byte.
    pub const MAX_SYMBOL_LEN: usize = 31;

    /// Encode a symbol the way a `bytes32` string is encoded: utf-8, zero padded on the right.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let bytes = symbol.as_bytes();
        if bytes.is_empty() || bytes.len() > Self::MAX_SYMBOL_LEN {
            return None;
        }
        let mut raw = [0u8; 32];
        raw[..bytes.len()].copy_from_slice(bytes);
        Some(Self(raw))
    }

    pub fn from_bytes(raw: [u8; 32]) -> Self {
        Self(raw)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Symbol text with the zero padding stripped.
    pub fn symbol(&self) -> String {
        let end = self.0.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
        String::from_utf8_lossy(&self.0[..end]).into_owned()
    }
}

impl fmt::Debug for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PairId({:?})", self.symbol())
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// 1.2: reference price. whole units, strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price(Decimal);

impl Price {
    #[must_use]
    pub fn new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO && value.fract().is_zero() {
            Some(Self(value.normalize()))
        } else {
            None
        }
    }

    #[must_use]
    pub fn from_units(units: u64) -> Option<Self> {
        Self::new(Decimal::from(units))
    }

    pub fn new_unchecked(value: Decimal) -> Self {
        debug_assert!(value > Decimal::ZERO);
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 1.3: collateral units. balances, reserved collateral, pnl magnitudes all use this.
// the ledger never lets a stored balance go below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote(Decimal);

impl Quote {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn from_units(units: u64) -> Self {
        Self(Decimal::from(units))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn is_whole(&self) -> bool {
        self.0.fract().is_zero()
    }

    pub fn checked_add(&self, other: Quote) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(&self, other: Quote) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    // floors at zero instead of going negative
    pub fn saturating_sub(&self, other: Quote) -> Self {
        if other.0 >= self.0 {
            Self::zero()
        } else {
            Self(self.0 - other.0)
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialOrd for Quote {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quote {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl Sum for Quote {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, q| Self(acc.0 + q.0))
    }
}

impl<'a> Sum<&'a Quote> for Quote {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, q| Self(acc.0 + q.0))
    }
}

// 1.4: millisecond timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }

    pub fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn price_rejects_zero_negative_and_fractional() {
        assert!(Price::new(dec!(0)).is_none());
        assert!(Price::new(dec!(-5)).is_none());
        assert!(Price::new(dec!(1000.5)).is_none());
        assert_eq!(Price::new(dec!(1000.00)).unwrap().value(), dec!(1000));
        assert_eq!(Price::from_units(1200).unwrap().value(), dec!(1200));
    }

    #[test]
    fn pair_symbol_encoding() {
        let pair = PairId::from_symbol("BTC/USDC").unwrap();
        assert_eq!(&pair.as_bytes()[..8], b"BTC/USDC");
        assert!(pair.as_bytes()[8..].iter().all(|b| *b == 0));
        assert_eq!(pair.symbol(), "BTC/USDC");
        assert_eq!(pair.to_string(), "BTC/USDC");
    }

    #[test]
    fn pair_symbol_limits() {
        assert!(PairId::from_symbol("").is_none());
        assert!(PairId::from_symbol(&"X".repeat(31)).is_some());
        assert!(PairId::from_symbol(&"X".repeat(32)).is_none());
        assert!(PairId::from_bytes([0u8; 32]).is_zero());
    }

    #[test]
    fn side_from_flag() {
        assert_eq!(Side::from_is_short(false), Side::Long);
        assert_eq!(Side::from_is_short(true), Side::Short);
        assert_eq!(Side::Long.opposite(), Side::Short);
        assert_eq!(Side::Short.to_string(), "short");
    }

    #[test]
    fn quote_saturating_sub_floors_at_zero() {
        let q = Quote::from_units(100);
        assert_eq!(q.saturating_sub(Quote::from_units(40)), Quote::from_units(60));
        assert_eq!(q.saturating_sub(Quote::from_units(400)), Quote::zero());
    }

    #[test]
    fn quote_whole_units() {
        assert!(Quote::from_units(7).is_whole());
        assert!(Quote::new(dec!(7.000)).is_whole());
        assert!(!Quote::new(dec!(0.5)).is_whole());
    }

    #[test]
    fn trade_id_sequence() {
        assert_eq!(TradeId::FIRST.next(), TradeId(2));
    }
}

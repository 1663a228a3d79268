// 4.0: pnl math. magnitude = amount * leverage * |current - entry|.
// long profits when price rises, short profits when it falls.
// a flat price is reported as (is_profit = false, magnitude = 0).
// 4.1 has the settlement payout at the bottom.

use crate::types::{Price, Quote, Side};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pnl {
    pub is_profit: bool,
    pub magnitude: Quote,
}

impl Pnl {
    pub fn flat() -> Self {
        Self {
            is_profit: false,
            magnitude: Quote::zero(),
        }
    }

    pub fn is_flat(&self) -> bool {
        self.magnitude.is_zero()
    }

    pub fn is_loss(&self) -> bool {
        !self.is_profit && !self.magnitude.is_zero()
    }

    /// Signed view: profit positive, loss negative.
    pub fn signed(&self) -> Decimal {
        if self.is_profit {
            self.magnitude.value()
        } else {
            -self.magnitude.value()
        }
    }
}

// 4.0.1: the pnl formula. pure, no state
pub fn calculate_pnl(
    side: Side,
    amount: u64,
    leverage: u32,
    entry_price: Price,
    current_price: Price,
) -> Result<Pnl, PnlError> {
    let delta = current_price.value() - entry_price.value();
    if delta.is_zero() {
        return Ok(Pnl::flat());
    }

    let magnitude = Decimal::from(amount)
        .checked_mul(Decimal::from(leverage))
        .and_then(|scaled| scaled.checked_mul(delta.abs()))
        .ok_or(PnlError::Overflow)?;

    let is_profit = (delta > Decimal::ZERO) != side.is_short();

    Ok(Pnl {
        is_profit,
        magnitude: Quote::new(magnitude),
    })
}

// 4.0.2: collateral locked at open. leverage does not reduce it.
pub fn required_collateral(amount: u64, price: Price) -> Result<Quote, PnlError> {
    Decimal::from(amount)
        .checked_mul(price.value())
        .map(Quote::new)
        .ok_or(PnlError::Overflow)
}

// 4.1: what custody pays back on close. losses eat collateral down to zero, no further.
pub fn settlement_payout(collateral: Quote, pnl: Pnl) -> Result<Quote, PnlError> {
    if pnl.is_profit {
        collateral.checked_add(pnl.magnitude).ok_or(PnlError::Overflow)
    } else {
        Ok(collateral.saturating_sub(pnl.magnitude))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PnlError {
    #[error("PnL arithmetic overflow")]
    Overflow,
}

// 2.0: trade record. opened once, closed once, never reopened.
// entry price, size, leverage, pair and side are frozen at creation.

use crate::pnl::{calculate_pnl, Pnl, PnlError};
use crate::types::{PairId, Price, Quote, Side, Timestamp, TradeId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeStatus {
    Open,
    Closed,
}

/// Parameters of an open request, checked before any balance is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeRequest {
    pub amount: u64,
    pub leverage: u32,
    pub pair: PairId,
    pub side: Side,
}

impl TradeRequest {
    pub fn new(amount: u64, leverage: u32, pair: PairId, is_short: bool) -> Self {
        Self {
            amount,
            leverage,
            pair,
            side: Side::from_is_short(is_short),
        }
    }

    pub fn validate(&self) -> Result<(), TradeError> {
        if self.amount == 0 {
            return Err(TradeError::ZeroAmount);
        }
        if self.leverage == 0 {
            return Err(TradeError::ZeroLeverage);
        }
        if self.pair.is_zero() {
            return Err(TradeError::MalformedPair);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub amount: u64,
    pub leverage: u32,
    pub pair: PairId,
    pub side: Side,
    pub entry_price: Price,
    pub collateral: Quote,
    pub status: TradeStatus,
    pub opened_at: Timestamp,
    pub closed_at: Option<Timestamp>,
    pub exit_price: Option<Price>,
    pub realized_pnl: Option<Pnl>,
}

impl Trade {
    pub fn open(
        id: TradeId,
        request: &TradeRequest,
        entry_price: Price,
        collateral: Quote,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            amount: request.amount,
            leverage: request.leverage,
            pair: request.pair,
            side: request.side,
            entry_price,
            collateral,
            status: TradeStatus::Open,
            opened_at: timestamp,
            closed_at: None,
            exit_price: None,
            realized_pnl: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == TradeStatus::Open
    }

    pub fn is_short(&self) -> bool {
        self.side.is_short()
    }

    pub fn pnl_at(&self, current_price: Price) -> Result<Pnl, PnlError> {
        calculate_pnl(self.side, self.amount, self.leverage, self.entry_price, current_price)
    }

    // 2.1: the one transition. Open -> Closed
    pub(crate) fn close(&mut self, exit_price: Price, pnl: Pnl, timestamp: Timestamp) {
        debug_assert!(self.is_open(), "closing a trade twice");
        self.status = TradeStatus::Closed;
        self.closed_at = Some(timestamp);
        self.exit_price = Some(exit_price);
        self.realized_pnl = Some(pnl);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TradeError {
    #[error("Trade amount must be positive")]
    ZeroAmount,

    #[error("Trade leverage must be positive")]
    ZeroLeverage,

    #[error("Pair identifier is empty or malformed")]
    MalformedPair,
}

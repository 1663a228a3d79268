// 8.0.2: result types and errors for engine operations.

use crate::config::ConfigError;
use crate::ledger::LedgerError;
use crate::oracle::OracleError;
use crate::pnl::{Pnl, PnlError};
use crate::trade::TradeError;
use crate::types::{AccountId, Price, Quote, Side, TradeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseResult {
    pub trade_id: TradeId,
    pub exit_price: Price,
    pub pnl: Pnl,
    pub collateral_released: Quote,
    pub payout: Quote,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Not enough balance to {side}: required {required}, available {available}")]
    InsufficientBalance {
        side: Side,
        required: Quote,
        available: Quote,
    },

    #[error("Trade already closed or does not exist")]
    NoSuchOpenTrade { account: AccountId, trade_id: TradeId },

    #[error("Trade {trade_id} not found for {account}")]
    TradeNotFound { account: AccountId, trade_id: TradeId },

    #[error("Invalid trade parameters: {0}")]
    InvalidTradeParameters(#[from] TradeError),

    #[error("{0} is reserved for trade custody")]
    ReservedAccount(AccountId),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(#[from] PnlError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// True for both the trade-open collateral check and a failed transfer.
    pub fn is_insufficient_balance(&self) -> bool {
        matches!(
            self,
            EngineError::InsufficientBalance { .. }
                | EngineError::Ledger(LedgerError::InsufficientBalance { .. })
        )
    }
}

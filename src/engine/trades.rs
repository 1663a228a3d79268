//! Trade lifecycle: open against collateral, evaluate, close and settle.

use super::core::Engine;
use super::results::{CloseResult, EngineError};
use crate::events::EventPayload;
use crate::ledger::CUSTODY_ACCOUNT;
use crate::pnl::{required_collateral, settlement_payout, Pnl};
use crate::trade::{Trade, TradeRequest};
use crate::types::{AccountId, PairId, TradeId};
use tracing::{info, warn};

impl Engine {
    /// Open a trade at the current reference price. Returns the new per-account id.
    pub fn add_trade(
        &mut self,
        caller: AccountId,
        amount: u64,
        leverage: u32,
        pair: PairId,
        is_short: bool,
    ) -> Result<TradeId, EngineError> {
        self.open_trade(caller, TradeRequest::new(amount, leverage, pair, is_short))
    }

    pub fn open_trade(&mut self, caller: AccountId, request: TradeRequest) -> Result<TradeId, EngineError> {
        if caller == CUSTODY_ACCOUNT {
            return Err(EngineError::ReservedAccount(caller));
        }
        request.validate()?;

        let entry_price = self.oracle.current();
        let collateral = required_collateral(request.amount, entry_price)?;
        let available = self.ledger.balance_of(caller);

        if available < collateral {
            warn!(
                account = %caller,
                side = %request.side,
                required = %collateral,
                available = %available,
                "trade rejected"
            );
            return Err(EngineError::InsufficientBalance {
                side: request.side,
                required: collateral,
                available,
            });
        }

        self.ledger.transfer(caller, CUSTODY_ACCOUNT, collateral)?;

        let book = self.books.entry(caller).or_default();
        let trade_id = TradeId(book.len() as u64 + 1);
        book.push(Trade::open(trade_id, &request, entry_price, collateral, self.current_time));

        info!(
            account = %caller,
            trade_id = %trade_id,
            pair = %request.pair,
            side = %request.side,
            amount = request.amount,
            leverage = request.leverage,
            %entry_price,
            "trade opened"
        );

        self.emit_event(EventPayload::TradeAdded {
            account: caller,
            trade_id,
        });

        Ok(trade_id)
    }

    /// Close an open trade at the current reference price and settle it.
    pub fn close_trade(&mut self, caller: AccountId, trade_id: TradeId) -> Result<CloseResult, EngineError> {
        let exit_price = self.oracle.current();

        let now = self.current_time;

        let trade = trade_index(trade_id)
            .and_then(|index| self.books.get_mut(&caller)?.get_mut(index))
            .filter(|trade| trade.is_open());
        let Some(trade) = trade else {
            warn!(account = %caller, trade_id = %trade_id, "close rejected");
            return Err(EngineError::NoSuchOpenTrade {
                account: caller,
                trade_id,
            });
        };

        let pnl = trade.pnl_at(exit_price)?;
        let collateral = trade.collateral;
        let payout = settlement_payout(collateral, pnl)?;

        // settlement and the status flip happen together or not at all
        self.ledger.settle_from_custody(caller, collateral, payout)?;
        trade.close(exit_price, pnl, now);

        info!(
            account = %caller,
            trade_id = %trade_id,
            %exit_price,
            is_profit = pnl.is_profit,
            magnitude = %pnl.magnitude,
            %payout,
            "trade closed"
        );

        self.emit_event(EventPayload::TradeClosed {
            account: caller,
            trade_id,
        });

        Ok(CloseResult {
            trade_id,
            exit_price,
            pnl,
            collateral_released: collateral,
            payout,
        })
    }

    /// PnL of a trade. Open trades are marked at the current price; closed
    /// trades report what was realized at close.
    pub fn calculate_pnl(&self, caller: AccountId, trade_id: TradeId) -> Result<Pnl, EngineError> {
        let trade = self
            .trade_list(caller, trade_id)
            .ok_or(EngineError::TradeNotFound {
                account: caller,
                trade_id,
            })?;

        match trade.realized_pnl {
            Some(realized) if !trade.is_open() => Ok(realized),
            _ => Ok(trade.pnl_at(self.oracle.current())?),
        }
    }

    pub fn trade_list(&self, account: AccountId, trade_id: TradeId) -> Option<&Trade> {
        self.books.get(&account)?.get(trade_index(trade_id)?)
    }

    /// Every trade of an account in id order, closed ones included.
    pub fn trades(&self, account: AccountId) -> &[Trade] {
        self.books.get(&account).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn open_trades(&self, account: AccountId) -> impl Iterator<Item = &Trade> {
        self.trades(account).iter().filter(|t| t.is_open())
    }

    /// Highest id issued to the account so far (0 when it never traded).
    pub fn trade_count(&self, account: AccountId) -> u64 {
        self.trades(account).len() as u64
    }
}

// ids start at 1, book slots at 0
fn trade_index(trade_id: TradeId) -> Option<usize> {
    usize::try_from(trade_id.0).ok()?.checked_sub(1)
}

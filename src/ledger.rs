//! Account ledger: balances of collateral units keyed by account.
//!
//! The ledger is the only place a balance changes. Every debit is checked
//! against the current balance first, so a stored balance is never negative.
//! Collateral backing open trades sits in a dedicated custody account that
//! lives in the same map, which keeps "sum of balances == total supply" true
//! after every operation.

use crate::types::{AccountId, Quote};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reserved key for collateral held against open trades.
pub const CUSTODY_ACCOUNT: AccountId = AccountId(0);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountLedger {
    balances: HashMap<AccountId, Quote>,
    total_supply: Quote,
}

impl AccountLedger {
    /// Ledger with `initial_supply` credited to `owner` and everyone else at zero.
    pub fn new(owner: AccountId, initial_supply: Quote) -> Self {
        let mut balances = HashMap::new();
        if !initial_supply.is_zero() {
            balances.insert(owner, initial_supply);
        }
        Self {
            balances,
            total_supply: initial_supply,
        }
    }

    pub fn balance_of(&self, account: AccountId) -> Quote {
        self.balances.get(&account).copied().unwrap_or_else(Quote::zero)
    }

    pub fn total_supply(&self) -> Quote {
        self.total_supply
    }

    pub fn custody_balance(&self) -> Quote {
        self.balance_of(CUSTODY_ACCOUNT)
    }

    pub fn accounts(&self) -> impl Iterator<Item = (&AccountId, &Quote)> {
        self.balances.iter()
    }

    // 10.1: move funds between two accounts. both sides update or neither does.
    pub fn transfer(&mut self, from: AccountId, to: AccountId, amount: Quote) -> Result<(), LedgerError> {
        if amount.is_negative() {
            return Err(LedgerError::NegativeAmount(amount));
        }
        if !amount.is_whole() {
            return Err(LedgerError::FractionalAmount(amount));
        }
        let available = self.balance_of(from);
        let from_after = available
            .checked_sub(amount)
            .filter(|b| !b.is_negative())
            .ok_or(LedgerError::InsufficientBalance {
                account: from,
                requested: amount,
                available,
            })?;

        if from == to {
            return Ok(());
        }

        let to_after = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.set_balance(from, from_after);
        self.set_balance(to, to_after);
        Ok(())
    }

    // 10.2: pay out a closed trade. custody releases `collateral`, `payout` lands on
    // the trader, and the difference is minted (profit) or burned (loss).
    pub(crate) fn settle_from_custody(
        &mut self,
        trader: AccountId,
        collateral: Quote,
        payout: Quote,
    ) -> Result<(), LedgerError> {
        let custody = self.custody_balance();
        let custody_after = custody
            .checked_sub(collateral)
            .filter(|b| !b.is_negative())
            .ok_or(LedgerError::InsufficientBalance {
                account: CUSTODY_ACCOUNT,
                requested: collateral,
                available: custody,
            })?;
        let trader_after = self
            .balance_of(trader)
            .checked_add(payout)
            .ok_or(LedgerError::Overflow)?;
        let supply_after = self
            .total_supply
            .checked_sub(collateral)
            .and_then(|s| s.checked_add(payout))
            .ok_or(LedgerError::Overflow)?;

        self.set_balance(CUSTODY_ACCOUNT, custody_after);
        self.set_balance(trader, trader_after);
        self.total_supply = supply_after;
        Ok(())
    }

    fn set_balance(&mut self, account: AccountId, balance: Quote) {
        debug_assert!(!balance.is_negative());
        if balance.is_zero() {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, balance);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Insufficient balance on {account}: requested {requested}, available {available}")]
    InsufficientBalance {
        account: AccountId,
        requested: Quote,
        available: Quote,
    },

    #[error("Transfer amount {0} is negative")]
    NegativeAmount(Quote),

    #[error("Transfer amount {0} is not a whole number of units")]
    FractionalAmount(Quote),

    #[error("Balance arithmetic overflow")]
    Overflow,
}

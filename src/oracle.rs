// 9.0: reference price. one price for every trade and every pair.
//
// reads are open to anyone. writes need the operator role, which the owner
// holds unless the config hands it elsewhere.

use crate::types::{AccountId, Price};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferencePrice {
    current: Price,
    operator: AccountId,
}

impl ReferencePrice {
    pub fn new(initial: Price, operator: AccountId) -> Self {
        Self {
            current: initial,
            operator,
        }
    }

    pub fn current(&self) -> Price {
        self.current
    }

    pub fn operator(&self) -> AccountId {
        self.operator
    }

    pub fn is_operator(&self, caller: AccountId) -> bool {
        caller == self.operator
    }

    /// Replace the price, returning the previous one.
    pub fn set(&mut self, caller: AccountId, price: Price) -> Result<Price, OracleError> {
        if !self.is_operator(caller) {
            return Err(OracleError::Unauthorized { caller });
        }
        let old = self.current;
        self.current = price;
        Ok(old)
    }

    /// Hand the operator role to another account.
    pub fn transfer_operator(&mut self, caller: AccountId, new_operator: AccountId) -> Result<(), OracleError> {
        if !self.is_operator(caller) {
            return Err(OracleError::Unauthorized { caller });
        }
        self.operator = new_operator;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("{caller} is not the price operator")]
    Unauthorized { caller: AccountId },
}

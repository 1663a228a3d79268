//! Reference price operations.

use super::core::Engine;
use super::results::EngineError;
use crate::events::EventPayload;
use crate::types::{AccountId, Price};
use tracing::{info, warn};

impl Engine {
    pub fn current_price(&self) -> Price {
        self.oracle.current()
    }

    pub fn price_operator(&self) -> AccountId {
        self.oracle.operator()
    }

    /// Update the reference price. Only the price operator may call this.
    pub fn set_current_price(&mut self, caller: AccountId, price: Price) -> Result<(), EngineError> {
        let old_price = match self.oracle.set(caller, price) {
            Ok(old) => old,
            Err(e) => {
                warn!(caller = %caller, %price, "price update rejected");
                return Err(EngineError::Oracle(e));
            }
        };

        info!(%old_price, new_price = %price, "reference price updated");

        self.emit_event(EventPayload::PriceUpdated {
            old_price,
            new_price: price,
        });

        Ok(())
    }

    /// Hand the price operator role to another account.
    pub fn transfer_price_operator(
        &mut self,
        caller: AccountId,
        new_operator: AccountId,
    ) -> Result<(), EngineError> {
        self.oracle.transfer_operator(caller, new_operator)?;
        info!(operator = %new_operator, "price operator changed");
        Ok(())
    }
}

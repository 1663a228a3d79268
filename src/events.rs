// 11.0: every successful state change produces an event. watchers subscribe through
// EventEmitter; the ledger itself never reads them back. failed operations emit nothing.

use crate::types::{AccountId, Price, Quote, Timestamp, TradeId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: Timestamp,
    pub payload: EventPayload,
}

impl Event {
    pub fn new(id: EventId, timestamp: Timestamp, payload: EventPayload) -> Self {
        Self {
            id,
            timestamp,
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPayload {
    // Trade lifecycle
    TradeAdded { account: AccountId, trade_id: TradeId },
    TradeClosed { account: AccountId, trade_id: TradeId },

    // Balances
    Transfer { from: AccountId, to: AccountId, amount: Quote },

    // Market
    PriceUpdated { old_price: Price, new_price: Price },
}

pub trait EventEmitter {
    fn emit(&mut self, event: &Event);
}

/// Subscriber that just keeps everything it is given.
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<Event>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventEmitter for EventCollector {
    fn emit(&mut self, event: &Event) {
        self.events.push(event.clone());
    }
}

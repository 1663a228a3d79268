// 8.0 engine/core.rs: main engine. holds the ledger, the reference price, every
// account's trade book and the event log.

use super::results::EngineError;
use crate::config::LedgerConfig;
use crate::events::{Event, EventEmitter, EventId, EventPayload};
use crate::ledger::{AccountLedger, CUSTODY_ACCOUNT};
use crate::oracle::ReferencePrice;
use crate::trade::Trade;
use crate::types::{AccountId, Quote, Timestamp};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, warn};

/** 8.1: main engine struct. all state lives here */
pub struct Engine {
    pub(super) config: LedgerConfig,
    pub(super) ledger: AccountLedger,
    pub(super) oracle: ReferencePrice,
    pub(super) books: HashMap<AccountId, Vec<Trade>>,
    pub(super) events: Vec<Event>,
    pub(super) subscribers: Vec<Box<dyn EventEmitter + Send>>,
    pub(super) next_event_id: u64,
    pub(super) current_time: Timestamp,
}

impl Engine {
    pub fn new(config: LedgerConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let ledger = AccountLedger::new(config.owner, config.initial_supply);
        let oracle = ReferencePrice::new(config.initial_price, config.owner);

        info!(
            owner = %config.owner,
            initial_price = %config.initial_price,
            initial_supply = %config.initial_supply,
            "ledger created"
        );

        Ok(Self {
            config,
            ledger,
            oracle,
            books: HashMap::new(),
            events: Vec::new(),
            subscribers: Vec::new(),
            next_event_id: 1,
            current_time: Timestamp::from_millis(0),
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn owner(&self) -> AccountId {
        self.config.owner
    }

    pub fn set_time(&mut self, timestamp: Timestamp) {
        self.current_time = timestamp;
    }

    pub fn time(&self) -> Timestamp {
        self.current_time
    }

    pub fn advance_time(&mut self, millis: i64) {
        self.current_time = Timestamp::from_millis(self.current_time.as_millis() + millis);
    }

    pub fn balance_of(&self, account: AccountId) -> Quote {
        self.ledger.balance_of(account)
    }

    pub fn total_supply(&self) -> Quote {
        self.ledger.total_supply()
    }

    pub fn custody_balance(&self) -> Quote {
        self.ledger.custody_balance()
    }

    pub fn ledger(&self) -> &AccountLedger {
        &self.ledger
    }

    // caller pays `to`. custody can only move through trade open/close
    pub fn transfer(&mut self, caller: AccountId, to: AccountId, amount: Quote) -> Result<(), EngineError> {
        for account in [caller, to] {
            if account == CUSTODY_ACCOUNT {
                return Err(EngineError::ReservedAccount(account));
            }
        }

        if let Err(e) = self.ledger.transfer(caller, to, amount) {
            warn!(from = %caller, to = %to, %amount, error = %e, "transfer rejected");
            return Err(EngineError::Ledger(e));
        }

        self.emit_event(EventPayload::Transfer {
            from: caller,
            to,
            amount,
        });

        Ok(())
    }

    /// Register a watcher. It sees every event emitted after this call.
    pub fn subscribe(&mut self, subscriber: Box<dyn EventEmitter + Send>) {
        self.subscribers.push(subscriber);
    }

    pub fn recent_events(&self, count: usize) -> &[Event] {
        let start = self.events.len().saturating_sub(count);
        &self.events[start..]
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub(super) fn emit_event(&mut self, payload: EventPayload) {
        let event = Event::new(EventId(self.next_event_id), self.current_time, payload);
        self.next_event_id += 1;

        debug!(id = event.id.0, payload = ?event.payload, "event");

        for subscriber in &mut self.subscribers {
            subscriber.emit(&event);
        }

        self.events.push(event);

        if self.events.len() > self.config.max_events {
            let drain_count = self.events.len() - self.config.max_events;
            self.events.drain(0..drain_count);
        }
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("ledger", &self.ledger)
            .field("oracle", &self.oracle)
            .field("books", &self.books)
            .field("events", &self.events.len())
            .field("subscribers", &self.subscribers.len())
            .field("current_time", &self.current_time)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    const OWNER: AccountId = AccountId(1);
    const USER: AccountId = AccountId(2);

    struct Shared(Arc<Mutex<Vec<Event>>>);

    impl EventEmitter for Shared {
        fn emit(&mut self, event: &Event) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn event_log_keeps_newest_only() {
        let config = LedgerConfig {
            max_events: 2,
            ..LedgerConfig::default()
        };
        let mut engine = Engine::new(config).unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        engine.subscribe(Box::new(Shared(Arc::clone(&seen))));

        for _ in 0..3 {
            engine.transfer(OWNER, USER, Quote::from_units(10)).unwrap();
        }

        let ids: Vec<_> = engine.events().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EventId(2), EventId(3)]);
        assert_eq!(engine.recent_events(5).len(), 2);

        // subscribers are not capped
        assert_eq!(seen.lock().unwrap().len(), 3);
        assert_eq!(engine.balance_of(USER), Quote::from_units(30));
    }

    #[test]
    fn clock_stamps_events() {
        let mut engine = Engine::new(LedgerConfig::default()).unwrap();
        assert_eq!(engine.time(), Timestamp::from_millis(0));

        engine.set_time(Timestamp::from_millis(1_000));
        engine.advance_time(500);
        assert_eq!(engine.time(), Timestamp::from_millis(1_500));

        engine.transfer(OWNER, USER, Quote::from_units(1)).unwrap();
        assert_eq!(engine.events()[0].timestamp, Timestamp::from_millis(1_500));
    }

    #[test]
    fn fractional_transfer_leaves_balances() {
        let mut engine = Engine::new(LedgerConfig::default()).unwrap();
        let before = engine.balance_of(OWNER);

        let result = engine.transfer(OWNER, USER, Quote::new(rust_decimal_macros::dec!(100000.25)));
        assert!(matches!(result, Err(EngineError::Ledger(crate::ledger::LedgerError::FractionalAmount(_)))));
        assert_eq!(engine.balance_of(USER), Quote::zero());
        assert_eq!(engine.balance_of(OWNER), before);
        assert!(engine.events().is_empty());
    }
}

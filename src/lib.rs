// leverage-ledger: leveraged position ledger.
// accounts open long/short trades against one reference price; collateral is
// gated on balance and pnl scales with leverage. deterministic, no external I/O.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: AccountId, TradeId, PairId, Side, Price, Quote
//   2.x  trade.rs: trade record, request validation, Open -> Closed
//   4.x  pnl.rs: pnl formula, collateral requirement, settlement payout
//   7.x  config.rs: starting price, owner, supply, env presets
//   8.x  engine/: core engine: transfers, trades, pricing
//   9.x  oracle.rs: reference price + operator role
//   10.x ledger.rs: balances, custody, supply
//   11.x events.rs: notifications for external watchers

pub mod config;
pub mod engine;
pub mod events;
pub mod ledger;
pub mod oracle;
pub mod pnl;
pub mod trade;
pub mod types;

// re exports for convenience
pub use config::{ConfigError, Environment, LedgerConfig};
pub use engine::*;
pub use events::*;
pub use ledger::{AccountLedger, LedgerError, CUSTODY_ACCOUNT};
pub use oracle::{OracleError, ReferencePrice};
pub use pnl::*;
pub use trade::*;
pub use types::*;

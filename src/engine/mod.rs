// 8.0: core ledger engine. coordinates balances, the reference price, trade
// open/close with settlement, and event notification.
// single writer: every mutation takes &mut self and either fully applies or fails untouched.

mod core;
mod pricing;
mod results;
mod trades;

pub use self::core::Engine;
pub use results::{CloseResult, EngineError};

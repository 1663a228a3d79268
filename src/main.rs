//! Leverage ledger simulation.
//!
//! Walks the ledger through funding, opening trades, moving the reference
//! price, and closing with settlement.

use leverage_ledger::*;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

const OWNER: AccountId = AccountId(1);
const ALICE: AccountId = AccountId(2);
const BOB: AccountId = AccountId(3);

fn main() -> Result<(), EngineError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Leverage Ledger Simulation");
    println!("Single reference price, collateral-gated trades\n");

    scenario_1_round_trip()?;
    scenario_2_long_and_short()?;
    scenario_3_rejections()?;

    println!("\nAll simulations completed successfully.");
    Ok(())
}

fn pair(symbol: &str) -> Result<PairId, EngineError> {
    PairId::from_symbol(symbol).ok_or(EngineError::InvalidTradeParameters(TradeError::MalformedPair))
}

fn price(units: u64) -> Price {
    Price::new_unchecked(Decimal::from(units))
}

fn new_engine() -> Result<Engine, EngineError> {
    let mut engine = Engine::new(Environment::Development.config())?;
    engine.set_time(Timestamp::now());
    Ok(engine)
}

/// Open, reprice, close.
fn scenario_1_round_trip() -> Result<(), EngineError> {
    println!("Scenario 1: PnL Round Trip\n");

    let mut engine = new_engine()?;
    engine.transfer(OWNER, ALICE, Quote::from_units(100_000))?;
    println!("  Alice funded with {}", engine.balance_of(ALICE));

    let id = engine.add_trade(ALICE, 100, 5, pair("BTC/USDC")?, false)?;
    println!("  Alice longs 100 @ {} at 5x, trade #{}", engine.current_price(), id);

    for units in [1200, 750] {
        engine.set_current_price(OWNER, price(units))?;
        let pnl = engine.calculate_pnl(ALICE, id)?;
        println!("    price {}: profit={} magnitude={}", units, pnl.is_profit, pnl.magnitude);
    }

    engine.set_current_price(OWNER, price(1100))?;
    let result = engine.close_trade(ALICE, id)?;
    println!("  Closed @ {}: payout {}, balance {}\n", result.exit_price, result.payout, engine.balance_of(ALICE));
    Ok(())
}

/// Opposite directions on the same move.
fn scenario_2_long_and_short() -> Result<(), EngineError> {
    println!("Scenario 2: Long vs Short\n");

    let mut engine = new_engine()?;
    engine.transfer(OWNER, ALICE, Quote::from_units(50_000))?;
    engine.transfer(OWNER, BOB, Quote::from_units(50_000))?;

    let long_id = engine.add_trade(ALICE, 10, 3, pair("ETH/USDC")?, false)?;
    let short_id = engine.add_trade(BOB, 10, 3, pair("ETH/USDC")?, true)?;

    engine.set_current_price(OWNER, price(900))?;
    let long = engine.close_trade(ALICE, long_id)?;
    let short = engine.close_trade(BOB, short_id)?;

    println!("  Price 1000 -> 900");
    println!("  Alice (long) payout {}, Bob (short) payout {}", long.payout, short.payout);
    println!("  Custody after close: {}\n", engine.custody_balance());
    Ok(())
}

/// Failure paths leave state untouched.
fn scenario_3_rejections() -> Result<(), EngineError> {
    println!("Scenario 3: Rejections\n");

    let mut engine = new_engine()?;
    engine.transfer(OWNER, ALICE, Quote::from_units(99_999))?;

    if let Err(e) = engine.add_trade(ALICE, 100, 2, pair("BTC/USD")?, false) {
        println!("  open: {}", e);
    }
    if let Err(e) = engine.close_trade(ALICE, TradeId(1)) {
        println!("  close: {}", e);
    }
    if let Err(e) = engine.set_current_price(ALICE, price(1)) {
        println!("  price: {}", e);
    }

    println!("  Alice balance still {}, events logged: {}", engine.balance_of(ALICE), engine.events().len());
    Ok(())
}

//! Backtest runner: the time-stepped simulation loop.

use crate::domain::bar::PriceSeries;
use crate::domain::error::BacksimError;
use crate::domain::exchange::SimulatedExchange;
use crate::domain::strategy::{Strategy, StrategyContext};
use crate::domain::summary::{summarize, Summary};

/// Run parameters. `start` is the first simulated tick, a fixed warm-up
/// margin independent of the strategy's actual indicator windows.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub cash: f64,
    pub commission: f64,
    pub start: usize,
}

pub const DEFAULT_CASH: f64 = 10_000.0;
pub const DEFAULT_START: usize = 100;

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            cash: DEFAULT_CASH,
            commission: 0.0,
            start: DEFAULT_START,
        }
    }
}

/// Replay `series` through `strategy` on a fresh simulated exchange.
///
/// `strategy.init` runs once before the loop; each tick in `[start, N)` then
/// advances the exchange cursor and hands control to `strategy.next`. The
/// final exchange state is reduced to a [`Summary`]. With `start >= N` the
/// loop body never runs and the summary equals the initial cash.
///
/// Every run owns its exchange and context exclusively, so repeated runs
/// over the same inputs are deterministic.
pub fn run_backtest<S: Strategy + ?Sized>(
    series: &PriceSeries,
    strategy: &mut S,
    config: &RunConfig,
) -> Result<Summary, BacksimError> {
    let mut exchange = SimulatedExchange::new(series, config.cash, config.commission)?;

    let mut ctx = StrategyContext::new(series, &mut exchange);
    strategy.init(&mut ctx)?;

    for tick in config.start..series.len() {
        ctx.advance(tick);
        strategy.next(&mut ctx, tick)?;
    }

    Ok(summarize(&exchange))
}

//! Strategy abstraction and the built-in SMA crossover strategy.
//!
//! A strategy implements two lifecycle hooks: `init`, called exactly once
//! before the run loop (the only place indicators may be computed), and
//! `next`, called once per tick. Market access goes through
//! [`StrategyContext`] rather than inherited state.

use crate::domain::bar::PriceSeries;
use crate::domain::error::BacksimError;
use crate::domain::exchange::SimulatedExchange;
use crate::domain::indicator::{self, IndicatorSeries};
use crate::domain::signal::crossover;

/// Context object handed to every strategy hook. Exposes the price data,
/// order submission, and indicator computation with its diagnostics registry.
pub struct StrategyContext<'a, 'b> {
    data: &'a PriceSeries,
    broker: &'b mut SimulatedExchange<'a>,
    registry: Vec<IndicatorSeries>,
}

impl<'a, 'b> StrategyContext<'a, 'b> {
    pub fn new(data: &'a PriceSeries, broker: &'b mut SimulatedExchange<'a>) -> Self {
        Self {
            data,
            broker,
            registry: Vec::new(),
        }
    }

    /// The full price series. During `next(tick)` a strategy must only read
    /// indices <= `tick`; this is a contract, not a runtime bound check.
    pub fn data(&self) -> &PriceSeries {
        self.data
    }

    /// Move the exchange's time cursor. Called by the runner before each
    /// `next` step.
    pub fn advance(&mut self, tick: usize) {
        self.broker.advance(tick);
    }

    /// Submit an all-in market buy at the current close.
    pub fn buy(&mut self) {
        self.broker.buy();
    }

    /// Submit an all-out market sell at the current close.
    pub fn sell(&mut self) {
        self.broker.sell();
    }

    pub fn cash(&self) -> f64 {
        self.broker.cash()
    }

    pub fn position(&self) -> f64 {
        self.broker.position()
    }

    /// Compute an indicator over the price series, enforcing length
    /// alignment. Every computed series is also appended to an informational
    /// registry; the registry never feeds back into the run loop.
    pub fn indicator<F>(&mut self, label: &str, f: F) -> Result<IndicatorSeries, BacksimError>
    where
        F: FnOnce(&PriceSeries) -> Vec<f64>,
    {
        let series = indicator::compute(label, self.data.len(), || f(self.data))?;
        self.registry.push(series.clone());
        Ok(series)
    }

    /// All indicators computed through this context, in creation order.
    pub fn indicators(&self) -> &[IndicatorSeries] {
        &self.registry
    }
}

/// A trading strategy: consume price and indicator data, emit buy/sell
/// intents through the context.
pub trait Strategy: std::fmt::Debug {
    /// Called exactly once before the run loop starts.
    fn init(&mut self, ctx: &mut StrategyContext) -> Result<(), BacksimError>;

    /// Called once per simulated time step, `tick` in `[start, N)`.
    fn next(&mut self, ctx: &mut StrategyContext, tick: usize) -> Result<(), BacksimError>;
}

/// Fast/slow simple-moving-average crossover.
///
/// Buys when the fast line crosses above the slow line, sells on the
/// opposite cross. Crosses are evaluated on the series sliced to `[..tick]`,
/// so the indicator value at the current bar is not inspected.
#[derive(Debug)]
pub struct SmaCross {
    fast_window: usize,
    slow_window: usize,
    fast: Option<IndicatorSeries>,
    slow: Option<IndicatorSeries>,
}

impl SmaCross {
    pub const DEFAULT_FAST: usize = 30;
    pub const DEFAULT_SLOW: usize = 90;

    pub fn new(fast_window: usize, slow_window: usize) -> Self {
        Self {
            fast_window,
            slow_window,
            fast: None,
            slow: None,
        }
    }

    fn cross(a: &[f64], b: &[f64]) -> Result<bool, BacksimError> {
        // Too little history means no signal this tick, not a failed run.
        match crossover(a, b) {
            Err(BacksimError::InsufficientHistory { .. }) => Ok(false),
            other => other,
        }
    }
}

impl Default for SmaCross {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FAST, Self::DEFAULT_SLOW)
    }
}

impl Strategy for SmaCross {
    fn init(&mut self, ctx: &mut StrategyContext) -> Result<(), BacksimError> {
        let fast_window = self.fast_window;
        let slow_window = self.slow_window;
        self.fast = Some(ctx.indicator(&format!("sma({fast_window})"), |data| {
            indicator::sma(&data.closes(), fast_window)
        })?);
        self.slow = Some(ctx.indicator(&format!("sma({slow_window})"), |data| {
            indicator::sma(&data.closes(), slow_window)
        })?);
        Ok(())
    }

    fn next(&mut self, ctx: &mut StrategyContext, tick: usize) -> Result<(), BacksimError> {
        let (Some(fast), Some(slow)) = (&self.fast, &self.slow) else {
            return Ok(());
        };

        if Self::cross(&fast.values[..tick], &slow.values[..tick])? {
            ctx.buy();
        } else if Self::cross(&slow.values[..tick], &fast.values[..tick])? {
            ctx.sell();
        }
        Ok(())
    }
}

#![allow(dead_code)]

use backsim::domain::bar::{Bar, PriceSeries};
use backsim::domain::error::BacksimError;
use backsim::domain::strategy::{Strategy, StrategyContext};
use chrono::{NaiveDate, NaiveDateTime};

pub fn ts(offset_days: usize) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + chrono::Duration::days(offset_days as i64)
}

pub fn make_bar(offset_days: usize, close: f64) -> Bar {
    Bar {
        timestamp: ts(offset_days),
        open: close,
        high: close,
        low: close,
        close,
        volume: Some(1000.0),
    }
}

pub fn make_series(closes: &[f64]) -> PriceSeries {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| make_bar(i, close))
        .collect();
    PriceSeries::new(bars).unwrap()
}

/// `n` closes moving linearly from `from` to `to` inclusive.
pub fn linear_closes(n: usize, from: f64, to: f64) -> Vec<f64> {
    (0..n)
        .map(|i| from + (to - from) * i as f64 / (n - 1) as f64)
        .collect()
}

pub fn flat_series(n: usize, value: f64) -> PriceSeries {
    make_series(&vec![value; n])
}

/// Declines from `peak` to `trough` over the first half, then rallies to
/// `top`. The dip pulls the fast SMA under the slow one, so the recovery
/// produces a single golden cross.
pub fn dip_and_rally_series(n: usize, peak: f64, trough: f64, top: f64) -> PriceSeries {
    let half = n / 2;
    let mut closes = linear_closes(half, peak, trough);
    closes.extend(linear_closes(n - half, trough, top));
    make_series(&closes)
}

/// Wraps a strategy and counts completed trades by watching the account
/// flip between all-cash and all-position around each `next` call.
#[derive(Debug)]
pub struct TradeSpy<S> {
    pub inner: S,
    pub buys: usize,
    pub sells: usize,
}

impl<S: Strategy> TradeSpy<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            buys: 0,
            sells: 0,
        }
    }
}

impl<S: Strategy> Strategy for TradeSpy<S> {
    fn init(&mut self, ctx: &mut StrategyContext) -> Result<(), BacksimError> {
        self.inner.init(ctx)
    }

    fn next(&mut self, ctx: &mut StrategyContext, tick: usize) -> Result<(), BacksimError> {
        let cash_before = ctx.cash();
        let position_before = ctx.position();

        self.inner.next(ctx, tick)?;

        if cash_before > 0.0 && ctx.cash() == 0.0 {
            self.buys += 1;
        }
        if position_before > 0.0 && ctx.position() == 0.0 {
            self.sells += 1;
        }
        Ok(())
    }
}

/// Strategy that never trades.
#[derive(Debug)]
pub struct Idle;

impl Strategy for Idle {
    fn init(&mut self, _ctx: &mut StrategyContext) -> Result<(), BacksimError> {
        Ok(())
    }

    fn next(&mut self, _ctx: &mut StrategyContext, _tick: usize) -> Result<(), BacksimError> {
        Ok(())
    }
}

//! Simulated exchange: account state and market-order execution.
//!
//! The account is fully-in or fully-out: a buy converts all cash into
//! position at the current close, a sell converts the whole position back.
//! Commission is applied multiplicatively on each side.

use crate::domain::bar::PriceSeries;
use crate::domain::error::BacksimError;

/// Commission rates above 5% are rejected at construction.
pub const MAX_COMMISSION: f64 = 0.05;

#[derive(Debug)]
pub struct SimulatedExchange<'a> {
    data: &'a PriceSeries,
    initial_cash: f64,
    cash: f64,
    position: f64,
    commission: f64,
    cursor: usize,
}

impl<'a> SimulatedExchange<'a> {
    pub fn new(
        data: &'a PriceSeries,
        cash: f64,
        commission: f64,
    ) -> Result<Self, BacksimError> {
        if !(cash > 0.0) {
            return Err(BacksimError::InvalidConfig {
                reason: format!("initial cash must be greater than 0, got {cash}"),
            });
        }
        if !(0.0..=MAX_COMMISSION).contains(&commission) {
            return Err(BacksimError::InvalidConfig {
                reason: format!(
                    "commission must be within [0, {MAX_COMMISSION}], got {commission}"
                ),
            });
        }

        Ok(Self {
            data,
            initial_cash: cash,
            cash,
            position: 0.0,
            commission,
            cursor: 0,
        })
    }

    /// Move the time cursor. Must be called before any trade in a step;
    /// `tick` must be a valid index into the price series.
    pub fn advance(&mut self, tick: usize) {
        self.cursor = tick;
    }

    pub fn tick(&self) -> usize {
        self.cursor
    }

    /// Close price at the current cursor.
    pub fn current_price(&self) -> f64 {
        self.data.bar(self.cursor).close
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn initial_cash(&self) -> f64 {
        self.initial_cash
    }

    /// Buy with all remaining cash at the current close, net of commission.
    /// Silent no-op when the account holds no cash.
    pub fn buy(&mut self) {
        if self.cash <= 0.0 {
            return;
        }
        self.position = self.cash * (1.0 - self.commission) / self.current_price();
        self.cash = 0.0;
    }

    /// Sell the whole position at the current close, net of commission.
    /// Silent no-op when the account holds no position.
    pub fn sell(&mut self) {
        if self.position <= 0.0 {
            return;
        }
        self.cash += self.position * self.current_price() * (1.0 - self.commission);
        self.position = 0.0;
    }

    /// Cash plus position valued at the current close.
    pub fn market_value(&self) -> f64 {
        self.cash + self.position * self.current_price()
    }
}

//! Result aggregation: reduce final exchange state to a summary record.

use std::fmt;

use crate::domain::exchange::SimulatedExchange;

/// The three-field backtest result returned to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub initial_market_value: f64,
    pub final_market_value: f64,
    pub profit: f64,
}

/// Pure function of the final exchange state; no side effects.
pub fn summarize(exchange: &SimulatedExchange) -> Summary {
    let initial = exchange.initial_cash();
    let fin = exchange.market_value();
    Summary {
        initial_market_value: initial,
        final_market_value: fin,
        profit: fin - initial,
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Initial market value  {:.2}", self.initial_market_value)?;
        writeln!(f, "Final market value    {:.2}", self.final_market_value)?;
        write!(f, "Profit                {:.2}", self.profit)
    }
}

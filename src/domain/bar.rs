//! OHLCV bar and validated price series.

use chrono::NaiveDateTime;

use crate::domain::error::BacksimError;

/// One time step of market data. `volume` is `None` when the source
/// carried no volume column.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
}

/// Ordered, validated sequence of bars, indexed by integer tick 0..N-1.
///
/// Construction sorts out-of-order input, then rejects anything the
/// simulation cannot run on: empty input, non-finite or negative OHLC,
/// duplicate timestamps. Immutable for the lifetime of a backtest run.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    pub fn new(mut bars: Vec<Bar>) -> Result<Self, BacksimError> {
        if bars.is_empty() {
            return Err(BacksimError::InvalidData {
                reason: "price series is empty".into(),
            });
        }

        if !bars.windows(2).all(|w| w[0].timestamp <= w[1].timestamp) {
            bars.sort_by_key(|b| b.timestamp);
        }

        for (i, bar) in bars.iter().enumerate() {
            for (field, value) in [
                ("open", bar.open),
                ("high", bar.high),
                ("low", bar.low),
                ("close", bar.close),
            ] {
                if !value.is_finite() {
                    return Err(BacksimError::InvalidData {
                        reason: format!("bar {i} has a missing or non-finite {field}"),
                    });
                }
                if value < 0.0 {
                    return Err(BacksimError::InvalidData {
                        reason: format!("bar {i} has a negative {field}: {value}"),
                    });
                }
            }
        }

        if let Some(w) = bars.windows(2).find(|w| w[0].timestamp == w[1].timestamp) {
            return Err(BacksimError::InvalidData {
                reason: format!("duplicate timestamp {}", w[0].timestamp),
            });
        }

        Ok(Self { bars })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bar(&self, tick: usize) -> &Bar {
        &self.bars[tick]
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// The Close column, the usual indicator input.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn first_timestamp(&self) -> NaiveDateTime {
        self.bars[0].timestamp
    }

    pub fn last_timestamp(&self) -> NaiveDateTime {
        self.bars[self.bars.len() - 1].timestamp
    }
}

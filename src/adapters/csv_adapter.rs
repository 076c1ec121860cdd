//! CSV file data adapter.
//!
//! Reads OHLCV rows from a headed CSV file into a validated
//! [`PriceSeries`]. Columns are located by header name (case-insensitive);
//! the volume column is optional. Empty OHLC cells load as NaN so the
//! series constructor rejects them as invalid data.

use crate::domain::bar::{Bar, PriceSeries};
use crate::domain::error::BacksimError;
use crate::ports::data_port::DataPort;
use chrono::{NaiveDate, NaiveDateTime};
use std::path::PathBuf;

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

struct Columns {
    timestamp: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: Option<usize>,
}

fn resolve_columns(headers: &csv::StringRecord) -> Result<Columns, BacksimError> {
    let find = |names: &[&str]| {
        headers
            .iter()
            .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
    };

    let required = |names: &[&str]| {
        find(names).ok_or_else(|| BacksimError::InvalidData {
            reason: format!("missing required column '{}'", names[0]),
        })
    };

    Ok(Columns {
        timestamp: required(&["timestamp", "date", "time"])?,
        open: required(&["open"])?,
        high: required(&["high"])?,
        low: required(&["low"])?,
        close: required(&["close"])?,
        volume: find(&["volume"]),
    })
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, BacksimError> {
    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(ts);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(ts) = date.and_hms_opt(0, 0, 0) {
            return Ok(ts);
        }
    }
    Err(BacksimError::Data {
        reason: format!("unrecognized timestamp '{value}'"),
    })
}

/// Empty cells become NaN; the series constructor turns them into
/// `InvalidData`, pointing at the offending row.
fn parse_price(record: &csv::StringRecord, index: usize, field: &str) -> Result<f64, BacksimError> {
    let raw = record.get(index).unwrap_or("").trim();
    if raw.is_empty() {
        return Ok(f64::NAN);
    }
    raw.parse().map_err(|e| BacksimError::Data {
        reason: format!("invalid {field} value '{raw}': {e}"),
    })
}

impl DataPort for CsvAdapter {
    fn load(&self) -> Result<PriceSeries, BacksimError> {
        let mut rdr = csv::Reader::from_path(&self.path).map_err(|e| BacksimError::Data {
            reason: format!("failed to open {}: {}", self.path.display(), e),
        })?;

        let headers = rdr.headers().map_err(|e| BacksimError::Data {
            reason: format!("failed to read CSV header: {e}"),
        })?;
        let columns = resolve_columns(headers)?;

        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| BacksimError::Data {
                reason: format!("CSV parse error: {e}"),
            })?;

            let raw_ts = record.get(columns.timestamp).unwrap_or("").trim();
            let timestamp = parse_timestamp(raw_ts)?;

            let volume = match columns.volume {
                Some(index) => {
                    let raw = record.get(index).unwrap_or("").trim();
                    if raw.is_empty() {
                        None
                    } else {
                        Some(raw.parse().map_err(|e| BacksimError::Data {
                            reason: format!("invalid volume value '{raw}': {e}"),
                        })?)
                    }
                }
                None => None,
            };

            bars.push(Bar {
                timestamp,
                open: parse_price(&record, columns.open, "open")?,
                high: parse_price(&record, columns.high, "high")?,
                low: parse_price(&record, columns.low, "low")?,
                close: parse_price(&record, columns.close, "close")?,
                volume,
            });
        }

        PriceSeries::new(bars)
    }
}

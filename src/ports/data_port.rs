//! Data access port trait.

use crate::domain::bar::PriceSeries;
use crate::domain::error::BacksimError;

/// Port for loading the historical price series a backtest runs on.
pub trait DataPort {
    fn load(&self) -> Result<PriceSeries, BacksimError>;
}

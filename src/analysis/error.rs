use chrono::NaiveDate;
use thiserror::Error;

use crate::indicators::error::IndicatorError;
use crate::services::market_data::MarketDataError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("invalid horizon {0}: horizons must be at least 1")]
    InvalidHorizon(u32),
    #[error(transparent)]
    MarketData(#[from] MarketDataError),
    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}

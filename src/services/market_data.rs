//! Price data source interface.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use thiserror::Error;

use crate::models::series::{PriceBar, PriceSeries, SeriesError};

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("no price data for {symbol} in the requested range")]
    EmptySeries { symbol: String },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("provider error {code}: {description}")]
    Api { code: String, description: String },
    #[error("failed to decode provider response: {0}")]
    Decode(String),
    #[error(transparent)]
    Series(#[from] SeriesError),
}

impl MarketDataError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            MarketDataError::Http(e) => e.is_connect() || e.is_timeout(),
            MarketDataError::Status(status) => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// Provider of daily close series.
///
/// `end` is inclusive. Implementations fail with `EmptySeries` when the symbol
/// is unknown or the range holds no trading days.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, MarketDataError>;
}

/// Series held in memory, keyed by upper-cased symbol.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPriceSource {
    series: HashMap<String, Vec<PriceBar>>,
}

impl InMemoryPriceSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.insert(series);
        self
    }

    pub fn insert(&mut self, series: PriceSeries) {
        self.series
            .insert(series.symbol().to_uppercase(), series.bars().to_vec());
    }
}

#[async_trait]
impl PriceSource for InMemoryPriceSource {
    async fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, MarketDataError> {
        let bars: Vec<PriceBar> = self
            .series
            .get(&symbol.to_uppercase())
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start && b.date <= end)
                    .copied()
                    .collect()
            })
            .unwrap_or_default();

        if bars.is_empty() {
            return Err(MarketDataError::EmptySeries {
                symbol: symbol.to_string(),
            });
        }

        Ok(PriceSeries::new(symbol, bars)?)
    }
}

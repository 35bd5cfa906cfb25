//! Yahoo Finance chart API price source

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, Days, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::models::series::PriceSeries;
use crate::services::market_data::{MarketDataError, PriceSource};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const USER_AGENT: &str = "Mozilla/5.0";
const NOT_FOUND_CODE: &str = "Not Found";

#[derive(Debug, Deserialize)]
struct YahooResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

/// Daily closes from the Yahoo v8 chart endpoint.
pub struct YahooPriceSource {
    client: Client,
    base_url: String,
    max_retries: usize,
    min_retry_delay: Duration,
}

impl YahooPriceSource {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_retries: 2,
            min_retry_delay: Duration::from_millis(500),
        }
    }

    /// `max_retries` counts retries after the first attempt.
    pub fn with_retry(mut self, max_retries: usize, min_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.min_retry_delay = min_delay;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_once(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, MarketDataError> {
        let url = format!("{}/{}", self.base_url, symbol);
        let (period1, period2) = period_bounds(start, end);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
            ])
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if status.is_server_error() || status.as_u16() == 429 {
            return Err(MarketDataError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: YahooResponse = serde_json::from_str(&body).map_err(|e| {
            if status.is_success() {
                MarketDataError::Decode(e.to_string())
            } else {
                MarketDataError::Status(status.as_u16())
            }
        })?;

        decode_chart(symbol, parsed)
    }
}

impl Default for YahooPriceSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Unix bounds for `[start, end]`; Yahoo treats `period2` as exclusive.
fn period_bounds(start: NaiveDate, end: NaiveDate) -> (i64, i64) {
    let to_unix = |date: NaiveDate| {
        date.and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or_default()
    };
    let after_end = end.checked_add_days(Days::new(1)).unwrap_or(end);
    (to_unix(start), to_unix(after_end))
}

fn decode_chart(symbol: &str, response: YahooResponse) -> Result<PriceSeries, MarketDataError> {
    let empty = || MarketDataError::EmptySeries {
        symbol: symbol.to_string(),
    };

    if let Some(error) = response.chart.error {
        if error.code == NOT_FOUND_CODE {
            return Err(empty());
        }
        return Err(MarketDataError::Api {
            code: error.code,
            description: error.description,
        });
    }

    let data = response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(empty)?;
    let timestamps = data.timestamp.unwrap_or_default();
    let quote = data
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| MarketDataError::Decode("missing quote block".to_string()))?;
    let offset = data.meta.gmtoffset.unwrap_or(0);

    // Several timestamps can fall on one date (e.g. a live intraday bar); the
    // later one wins.
    let mut closes: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for (i, &ts) in timestamps.iter().enumerate() {
        let Some(close) = quote.close.get(i).copied().flatten() else {
            continue;
        };
        if !close.is_finite() || close <= 0.0 {
            warn!(symbol, timestamp = ts, close, "skipping bar with invalid close");
            continue;
        }
        let Some(date) = DateTime::from_timestamp(ts + offset, 0).map(|dt| dt.date_naive()) else {
            warn!(symbol, timestamp = ts, "skipping out-of-range timestamp");
            continue;
        };
        closes.insert(date, close);
    }

    if closes.is_empty() {
        return Err(empty());
    }

    debug!(symbol, rows = closes.len(), "decoded Yahoo chart");
    Ok(PriceSeries::from_pairs(symbol, closes)?)
}

#[async_trait]
impl PriceSource for YahooPriceSource {
    async fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, MarketDataError> {
        info!(symbol, %start, %end, "fetching daily prices");

        let backoff = ExponentialBuilder::default()
            .with_min_delay(self.min_retry_delay)
            .with_max_times(self.max_retries);

        (|| async { self.fetch_once(symbol, start, end).await })
            .retry(backoff)
            .when(|e: &MarketDataError| e.is_transient())
            .notify(|e: &MarketDataError, delay: Duration| {
                warn!(symbol, error = %e, ?delay, "price fetch failed, retrying");
            })
            .await
    }
}

//! Explicit fetch cache keyed by symbol and date range

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::series::PriceSeries;
use crate::services::market_data::{MarketDataError, PriceSource};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl CacheKey {
    pub fn new(symbol: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            start,
            end,
        }
    }
}

/// Wraps a `PriceSource` and memoizes successful fetches.
///
/// Failures are never cached. Entries live until invalidated. Concurrent
/// misses on one key may each reach the inner source; all of them return the
/// first stored series.
pub struct CachedPriceSource<S> {
    inner: S,
    entries: RwLock<HashMap<CacheKey, PriceSeries>>,
}

impl<S: PriceSource> CachedPriceSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn invalidate(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> bool {
        self.entries
            .write()
            .await
            .remove(&CacheKey::new(symbol, start, end))
            .is_some()
    }

    /// Drop every range cached for `symbol`. Returns how many were removed.
    pub async fn invalidate_symbol(&self, symbol: &str) -> usize {
        let symbol = symbol.to_uppercase();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| key.symbol != symbol);
        before - entries.len()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[async_trait]
impl<S: PriceSource> PriceSource for CachedPriceSource<S> {
    async fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, MarketDataError> {
        let key = CacheKey::new(symbol, start, end);

        if let Some(series) = self.entries.read().await.get(&key) {
            debug!(symbol = %key.symbol, %start, %end, "price cache hit");
            return Ok(series.clone());
        }

        debug!(symbol = %key.symbol, %start, %end, "price cache miss");
        let series = self.inner.fetch(symbol, start, end).await?;
        // A concurrent miss may have stored the key meanwhile; keep the first.
        let mut entries = self.entries.write().await;
        Ok(entries.entry(key).or_insert(series).clone())
    }
}

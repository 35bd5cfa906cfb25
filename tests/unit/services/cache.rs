//! Unit tests for the price cache

use async_trait::async_trait;
use chrono::NaiveDate;
use macdscan::models::series::PriceSeries;
use macdscan::services::{CachedPriceSource, InMemoryPriceSource, MarketDataError, PriceSource};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::support::{daily_series, day, rising};

/// Counts how often the wrapped source is hit.
struct CountingSource {
    inner: InMemoryPriceSource,
    calls: AtomicUsize,
}

impl CountingSource {
    fn new() -> Self {
        Self {
            inner: InMemoryPriceSource::new().with_series(daily_series(&rising(40))),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceSource for CountingSource {
    async fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(symbol, start, end).await
    }
}

#[tokio::test]
async fn test_second_fetch_is_served_from_cache() {
    let cache = CachedPriceSource::new(CountingSource::new());

    let first = cache.fetch("TEST", day(0), day(9)).await.unwrap();
    let second = cache.fetch("test", day(0), day(9)).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(cache.inner().calls(), 1);
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn test_different_range_is_a_different_entry() {
    let cache = CachedPriceSource::new(CountingSource::new());
    cache.fetch("TEST", day(0), day(9)).await.unwrap();
    cache.fetch("TEST", day(0), day(19)).await.unwrap();
    assert_eq!(cache.inner().calls(), 2);
    assert_eq!(cache.len().await, 2);
}

#[tokio::test]
async fn test_invalidate_forces_refetch() {
    let cache = CachedPriceSource::new(CountingSource::new());
    cache.fetch("TEST", day(0), day(9)).await.unwrap();

    assert!(cache.invalidate("TEST", day(0), day(9)).await);
    assert!(!cache.invalidate("TEST", day(0), day(9)).await);

    cache.fetch("TEST", day(0), day(9)).await.unwrap();
    assert_eq!(cache.inner().calls(), 2);
}

#[tokio::test]
async fn test_invalidate_symbol_and_clear() {
    let cache = CachedPriceSource::new(CountingSource::new());
    cache.fetch("TEST", day(0), day(9)).await.unwrap();
    cache.fetch("TEST", day(0), day(19)).await.unwrap();

    assert_eq!(cache.invalidate_symbol("test").await, 2);
    assert!(cache.is_empty().await);

    cache.fetch("TEST", day(0), day(9)).await.unwrap();
    cache.clear().await;
    assert!(cache.is_empty().await);
}

#[test]
fn test_failures_are_not_cached() {
    let cache = CachedPriceSource::new(CountingSource::new());

    tokio_test::block_on(async {
        assert!(cache.fetch("NOPE", day(0), day(9)).await.is_err());
        assert!(cache.fetch("NOPE", day(0), day(9)).await.is_err());
        assert!(cache.is_empty().await);
    });

    assert_eq!(cache.inner().calls(), 2);
}

#[tokio::test]
async fn test_concurrent_misses_share_first_stored_series() {
    let cache = CachedPriceSource::new(CountingSource::new());

    let (a, b) = tokio::join!(
        cache.fetch("TEST", day(0), day(9)),
        cache.fetch("TEST", day(0), day(9)),
    );

    assert_eq!(a.unwrap(), b.unwrap());
    assert_eq!(cache.len().await, 1);
    assert!((1..=2).contains(&cache.inner().calls()));
}

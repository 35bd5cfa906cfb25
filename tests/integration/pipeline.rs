//! End-to-end analysis runs over in-memory price data.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use macdscan::analysis::{
    measure_performance, AnalysisError, AnalysisPipeline, AnalysisRequest, HorizonResolution,
    PerformanceConfig,
};
use macdscan::config::AnalysisConfig;
use macdscan::indicators::IndicatorError;
use macdscan::models::crossover::CrossoverDirection;
use macdscan::models::series::PriceSeries;
use macdscan::services::{CachedPriceSource, InMemoryPriceSource, MarketDataError};
use std::sync::Arc;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
}

/// A year of weekday closes oscillating around a rising trend.
fn trading_year() -> PriceSeries {
    let mut pairs = Vec::new();
    let mut date = start();
    let mut i = 0;
    while pairs.len() < 260 {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            let phase = i as f64 * std::f64::consts::TAU / 25.0;
            pairs.push((date, 150.0 + 12.0 * phase.sin() + 0.1 * i as f64));
            i += 1;
        }
        date = date.succ_opt().unwrap();
    }
    PriceSeries::from_pairs("ACME", pairs).unwrap()
}

fn pipeline_with(config: AnalysisConfig) -> AnalysisPipeline {
    let source = InMemoryPriceSource::new().with_series(trading_year());
    AnalysisPipeline::new(Arc::new(source), config)
}

fn full_range() -> AnalysisRequest {
    let end = start().checked_add_days(Days::new(400)).unwrap();
    AnalysisRequest::new("ACME", start(), end)
}

#[tokio::test]
async fn run_produces_limited_descending_records() {
    let pipeline = pipeline_with(AnalysisConfig::default());
    let report = pipeline.run(&full_range()).await.expect("analysis succeeds");

    assert_eq!(report.symbol, "ACME");
    assert_eq!(report.indicators.len(), 260);
    assert!(report.events.len() > 5);
    assert_eq!(report.performance.len(), 5);
    assert!(report.performance.windows(2).all(|w| w[0].date > w[1].date));

    let newest_event = report.events.last().unwrap();
    assert_eq!(report.performance[0].date, newest_event.date);
    assert_eq!(report.horizons, vec![7, 14, 30]);
    assert_eq!(report.summary.stats.len(), 6);
}

#[tokio::test]
async fn events_are_chronological_and_on_trading_days() {
    let pipeline = pipeline_with(AnalysisConfig::default());
    let report = pipeline.run(&full_range()).await.unwrap();

    assert!(report.events.windows(2).all(|w| w[0].date < w[1].date));
    for event in &report.events {
        let row = &report.indicators.rows[event.index];
        assert_eq!(row.date, event.date);
        assert_eq!(row.close, event.close_price);
    }
}

#[tokio::test]
async fn below_zero_filter_keeps_only_negative_bullish() {
    let pipeline = pipeline_with(AnalysisConfig::default());
    let all = pipeline.run(&full_range()).await.unwrap();
    let filtered = pipeline
        .run(&full_range().with_filter_below_zero(true))
        .await
        .unwrap();

    assert!(filtered.events.len() <= all.events.len());
    assert!(filtered
        .events
        .iter()
        .filter(|e| e.direction == CrossoverDirection::Bullish)
        .all(|e| e.macd_value < 0.0));
    let bearish = |events: &[macdscan::models::crossover::CrossoverEvent]| {
        events
            .iter()
            .filter(|e| e.direction == CrossoverDirection::Bearish)
            .count()
    };
    assert_eq!(bearish(&filtered.events), bearish(&all.events));
}

#[tokio::test]
async fn trading_row_horizons_resolve_every_early_event() {
    let config = AnalysisConfig {
        performance: PerformanceConfig::new(vec![10], HorizonResolution::TradingRows, None).unwrap(),
        ..AnalysisConfig::default()
    };
    let pipeline = pipeline_with(config);
    let report = pipeline.run(&full_range()).await.unwrap();

    assert_eq!(report.performance.len(), report.events.len());
    for record in &report.performance {
        let index = report.events.iter().find(|e| e.date == record.date).unwrap().index;
        assert_eq!(record.is_available(10), index + 10 < 260);
    }
}

#[tokio::test]
async fn inverted_range_is_rejected() {
    let pipeline = pipeline_with(AnalysisConfig::default());
    let request = AnalysisRequest::new("ACME", start().succ_opt().unwrap(), start());
    let err = pipeline.run(&request).await.unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidRange { .. }));
}

#[tokio::test]
async fn single_session_is_insufficient_data() {
    let pipeline = pipeline_with(AnalysisConfig::default());
    let err = pipeline
        .run(&AnalysisRequest::new("ACME", start(), start()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::Indicator(IndicatorError::InsufficientData { actual: 1, .. })
    ));
}

#[tokio::test]
async fn unknown_symbol_is_reported_from_source() {
    let pipeline = pipeline_with(AnalysisConfig::default());
    let err = pipeline
        .run(&AnalysisRequest::new("ZZZZ", start(), start()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::MarketData(MarketDataError::EmptySeries { .. })
    ));
}

#[tokio::test]
async fn reruns_through_cache_are_identical() {
    let source = Arc::new(CachedPriceSource::new(
        InMemoryPriceSource::new().with_series(trading_year()),
    ));
    let pipeline = AnalysisPipeline::new(source.clone(), AnalysisConfig::default());

    let first = pipeline.run(&full_range()).await.unwrap();
    let second = pipeline.run(&full_range()).await.unwrap();

    assert_eq!(source.len().await, 1);
    assert_eq!(first.indicators, second.indicators);
    assert_eq!(first.events, second.events);
    assert_eq!(first.performance, second.performance);
}

#[tokio::test]
async fn summary_covers_every_crossover_beyond_the_listing_limit() {
    let config = AnalysisConfig::default();
    let performance = config.performance.clone();
    let pipeline = pipeline_with(config);
    let report = pipeline.run(&full_range()).await.unwrap();

    assert_eq!(report.performance.len(), 5);
    assert!(report.events.len() > report.performance.len());

    let all = measure_performance(&trading_year(), &report.events, &performance);
    assert_eq!(all.len(), report.events.len());

    for &horizon in &report.horizons {
        let samples: usize = [CrossoverDirection::Bullish, CrossoverDirection::Bearish]
            .into_iter()
            .filter_map(|direction| report.summary.get(direction, horizon))
            .map(|stats| stats.samples)
            .sum();
        let available = all.iter().filter(|r| r.is_available(horizon)).count();
        assert_eq!(samples, available, "horizon {horizon}");
    }

    let early_7d = all.iter().filter(|r| r.is_available(7)).count();
    assert!(early_7d > 5);
}

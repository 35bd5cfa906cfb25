//! Unit tests for crossover detection

use macdscan::indicators::compute_indicators;
use macdscan::models::crossover::CrossoverDirection;
use macdscan::models::indicators::IndicatorParams;
use macdscan::signals::{detect_crossovers, detect_with_filter, CrossoverFilter};

use crate::support::{daily_series, rising, table_from, wave};

#[test]
fn test_bullish_crossover() {
    let table = table_from(&[(-1.0, 0.0), (-0.5, 0.0), (0.5, 0.0)]);
    let events = detect_crossovers(&table, false);

    assert_eq!(events.len(), 1);
    let event = events[0];
    assert_eq!(event.direction, CrossoverDirection::Bullish);
    assert_eq!(event.index, 2);
    assert_eq!(event.date, table.rows[2].date);
    assert_eq!(event.macd_value, 0.5);
    assert_eq!(event.close_price, table.rows[2].close);
}

#[test]
fn test_bearish_crossover() {
    let table = table_from(&[(1.0, 0.5), (0.2, 0.5)]);
    let events = detect_crossovers(&table, false);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].direction, CrossoverDirection::Bearish);
    assert_eq!(events[0].signal_value, 0.5);
}

#[test]
fn test_touch_counts_once() {
    // Reaching the signal line counts as crossing; staying on it does not refire.
    let table = table_from(&[(-1.0, 0.0), (0.0, 0.0), (0.0, 0.0), (1.0, 0.0)]);
    let events = detect_crossovers(&table, false);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].index, 1);
    assert_eq!(events[0].direction, CrossoverDirection::Bullish);
}

#[test]
fn test_equal_previous_does_not_trigger() {
    let table = table_from(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
    let events = detect_crossovers(&table, false);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].direction, CrossoverDirection::Bearish);
    assert_eq!(events[0].index, 2);
}

#[test]
fn test_below_zero_filter_drops_positive_bullish() {
    let table = table_from(&[
        (-2.0, -1.0),
        (-0.5, -1.0), // bullish below zero
        (-1.5, -1.0), // bearish
        (0.5, 0.0),   // bullish above zero
    ]);

    let all = detect_crossovers(&table, false);
    assert_eq!(all.len(), 3);

    let filtered = detect_with_filter(&table, CrossoverFilter::below_zero());
    assert_eq!(filtered.len(), 2);
    assert_eq!(filtered[0].direction, CrossoverDirection::Bullish);
    assert!(filtered[0].macd_value < 0.0);
    assert_eq!(filtered[1].direction, CrossoverDirection::Bearish);
}

#[test]
fn test_filter_defaults_off() {
    assert!(!CrossoverFilter::default().below_zero_only);
}

#[test]
fn test_flat_series_has_no_crossovers() {
    let series = daily_series(&[100.0; 50]);
    let table = compute_indicators(&series, &IndicatorParams::default()).unwrap();
    assert!(table.macd().iter().all(|&v| v == 0.0));
    assert!(detect_crossovers(&table, false).is_empty());
}

#[test]
fn test_rising_series_has_no_bearish_crossover() {
    let series = daily_series(&rising(40));
    let table = compute_indicators(&series, &IndicatorParams::default()).unwrap();
    let events = detect_crossovers(&table, false);

    assert!(table.last().unwrap().macd > 0.0);
    assert!(events
        .iter()
        .all(|e| e.direction != CrossoverDirection::Bearish));
}

#[test]
fn test_oscillating_series_alternates() {
    let series = daily_series(&wave(180));
    let table = compute_indicators(&series, &IndicatorParams::default()).unwrap();
    let events = detect_crossovers(&table, false);

    assert!(events.len() >= 4);
    assert!(events.len() <= series.len() - 1);
    for pair in events.windows(2) {
        assert!(pair[0].index < pair[1].index);
        assert_ne!(pair[0].direction, pair[1].direction);
    }
}

#[test]
fn test_empty_table_yields_no_events() {
    let table = table_from(&[]);
    assert!(detect_crossovers(&table, true).is_empty());
}

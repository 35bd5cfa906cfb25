//! Shared fixtures for unit tests

#![allow(dead_code)]

use chrono::{Datelike, Days, NaiveDate, Weekday};
use macdscan::models::indicators::{IndicatorParams, IndicatorRow, IndicatorTable};
use macdscan::models::series::PriceSeries;

pub fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .checked_add_days(Days::new(offset))
        .unwrap()
}

/// One close per consecutive calendar day starting 2024-01-01.
pub fn daily_series(closes: &[f64]) -> PriceSeries {
    PriceSeries::from_pairs(
        "TEST",
        closes.iter().enumerate().map(|(i, &c)| (day(i as u64), c)),
    )
    .unwrap()
}

/// One close per weekday starting Monday 2024-01-01; weekends are skipped.
pub fn weekday_series(closes: &[f64]) -> PriceSeries {
    let mut dates = Vec::with_capacity(closes.len());
    let mut date = day(0);
    while dates.len() < closes.len() {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            dates.push(date);
        }
        date = date.succ_opt().unwrap();
    }
    PriceSeries::from_pairs("TEST", dates.into_iter().zip(closes.iter().copied())).unwrap()
}

/// Oscillating closes with a slight upward drift.
pub fn wave(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| {
            let phase = i as f64 * std::f64::consts::TAU / 30.0;
            100.0 + 10.0 * phase.sin() + 0.05 * i as f64
        })
        .collect()
}

pub fn rising(count: usize) -> Vec<f64> {
    (0..count).map(|i| 100.0 + i as f64).collect()
}

/// Indicator table from hand-picked `(macd, signal)` pairs.
pub fn table_from(pairs: &[(f64, f64)]) -> IndicatorTable {
    let rows = pairs
        .iter()
        .enumerate()
        .map(|(i, &(macd, signal))| IndicatorRow {
            date: day(i as u64),
            close: 100.0 + i as f64,
            ema_short: 0.0,
            ema_long: 0.0,
            macd,
            signal,
            histogram: macd - signal,
            rsi: None,
        })
        .collect();
    IndicatorTable {
        params: IndicatorParams::default(),
        rows,
    }
}

//! MACD (Moving Average Convergence Divergence) indicator

use crate::indicators::trend::ema_series;
use crate::models::indicators::MacdIndicator;
use crate::models::series::PriceSeries;

/// Full MACD columns for a close series.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub ema_short: Vec<f64>,
    pub ema_long: Vec<f64>,
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Compute MACD columns for every close
///
/// MACD = EMA(short) - EMA(long)
/// Signal = EMA(signal) of MACD, seeded at the first MACD value
/// Histogram = MACD - Signal
pub fn macd_series(closes: &[f64], short_window: u32, long_window: u32, signal_window: u32) -> MacdSeries {
    let ema_short = ema_series(closes, short_window);
    let ema_long = ema_series(closes, long_window);

    let macd: Vec<f64> = ema_short
        .iter()
        .zip(&ema_long)
        .map(|(short, long)| short - long)
        .collect();
    let signal = ema_series(&macd, signal_window);
    let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

    MacdSeries {
        ema_short,
        ema_long,
        macd,
        signal,
        histogram,
    }
}

/// Latest MACD reading for a price series.
pub fn calculate_macd(
    series: &PriceSeries,
    fast_period: u32,
    slow_period: u32,
    signal_period: u32,
) -> Option<MacdIndicator> {
    if series.len() < 2 {
        return None;
    }

    let columns = macd_series(&series.closes(), fast_period, slow_period, signal_period);

    Some(MacdIndicator {
        macd: *columns.macd.last()?,
        signal: *columns.signal.last()?,
        histogram: *columns.histogram.last()?,
        period: Some((fast_period, slow_period, signal_period)),
    })
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(series: &PriceSeries) -> Option<MacdIndicator> {
    calculate_macd(series, 12, 26, 9)
}

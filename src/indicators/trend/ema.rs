//! EMA (Exponential Moving Average) indicator

use crate::models::indicators::EmaIndicator;
use crate::models::series::PriceSeries;

/// Smoothing factor `2 / (window + 1)`.
pub fn ema_alpha(window: u32) -> f64 {
    2.0 / (window as f64 + 1.0)
}

/// Recursive EMA over `values`.
///
/// `ema[0] = values[0]`, then `ema[t] = values[t] * α + ema[t-1] * (1 - α)`,
/// evaluated as `ema[t-1] + α * (values[t] - ema[t-1])` so a flat input stays
/// exactly flat. There is no warm-up gap and no bias adjustment: every input
/// produces an output. Returns an empty vec for empty input or a zero window.
pub fn ema_series(values: &[f64], window: u32) -> Vec<f64> {
    if window == 0 || values.is_empty() {
        return Vec::new();
    }

    let alpha = ema_alpha(window);
    let mut result = Vec::with_capacity(values.len());
    let mut prev = values[0];
    result.push(prev);

    for &value in &values[1..] {
        prev += alpha * (value - prev);
        result.push(prev);
    }

    result
}

/// Latest EMA of the close series for a specific window
pub fn calculate_ema(series: &PriceSeries, window: u32) -> Option<EmaIndicator> {
    let value = *ema_series(&series.closes(), window).last()?;
    Some(EmaIndicator {
        value,
        period: window,
    })
}

/// Calculate multiple EMAs at once
pub fn calculate_emas(series: &PriceSeries, windows: &[u32]) -> Vec<EmaIndicator> {
    windows
        .iter()
        .filter_map(|&window| calculate_ema(series, window))
        .collect()
}

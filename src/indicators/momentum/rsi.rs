//! RSI (Relative Strength Index) indicator

use crate::models::indicators::{RsiIndicator, RsiSmoothing};
use crate::models::series::PriceSeries;

/// RSI from average gain and average loss.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// An average loss of zero yields 100.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss <= 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    (100.0 - (100.0 / (1.0 + rs))).clamp(0.0, 100.0)
}

fn split_deltas(closes: &[f64]) -> (Vec<f64>, Vec<f64>) {
    closes
        .windows(2)
        .map(|pair| {
            let change = pair[1] - pair[0];
            (change.max(0.0), (-change).max(0.0))
        })
        .unzip()
}

fn simple_averages(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let slice = &values[start..=i];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

fn wilder_averages(values: &[f64], window: usize) -> Vec<f64> {
    let mut result = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    let mut prev = 0.0;

    for (i, &value) in values.iter().enumerate() {
        let count = i + 1;
        prev = if count <= window {
            sum += value;
            sum / count as f64
        } else {
            (prev * (window as f64 - 1.0) + value) / window as f64
        };
        result.push(prev);
    }

    result
}

/// RSI for every close. Index 0 is `None` because it has no prior close.
///
/// The first `window - 1` values average fewer than `window` deltas, so they
/// are noisier than later ones.
pub fn rsi_series(closes: &[f64], window: u32, smoothing: RsiSmoothing) -> Vec<Option<f64>> {
    if closes.is_empty() {
        return Vec::new();
    }
    let window = window.max(1) as usize;

    let (gains, losses) = split_deltas(closes);
    let (avg_gains, avg_losses) = match smoothing {
        RsiSmoothing::Simple => (simple_averages(&gains, window), simple_averages(&losses, window)),
        RsiSmoothing::Wilder => (wilder_averages(&gains, window), wilder_averages(&losses, window)),
    };

    let mut result = Vec::with_capacity(closes.len());
    result.push(None);
    result.extend(
        avg_gains
            .iter()
            .zip(&avg_losses)
            .map(|(&gain, &loss)| Some(rsi_from_averages(gain, loss))),
    );
    result
}

/// Latest RSI over the last `period` deltas.
pub fn calculate_rsi(series: &PriceSeries, period: u32) -> Option<RsiIndicator> {
    if series.len() < period as usize + 1 {
        return None;
    }

    let value = rsi_series(&series.closes(), period, RsiSmoothing::Simple)
        .last()
        .copied()
        .flatten()?;

    Some(RsiIndicator {
        value,
        period: Some(period),
    })
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(series: &PriceSeries) -> Option<RsiIndicator> {
    calculate_rsi(series, 14)
}

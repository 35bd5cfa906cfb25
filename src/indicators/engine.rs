//! Indicator engine: MACD and RSI columns over a whole price series

use tracing::debug;

use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::{macd_series, rsi_series};
use crate::models::indicators::{IndicatorParams, IndicatorRow, IndicatorTable};
use crate::models::series::PriceSeries;

pub const MIN_PRICES: usize = 2;

/// Compute one `IndicatorRow` per bar of `series`.
///
/// Fails with `InsufficientData` when fewer than two closes are available,
/// since neither a crossover nor an RSI delta exists below that.
pub fn compute_indicators(
    series: &PriceSeries,
    params: &IndicatorParams,
) -> Result<IndicatorTable, IndicatorError> {
    params.validate()?;

    if series.len() < MIN_PRICES {
        return Err(IndicatorError::InsufficientData {
            required: MIN_PRICES,
            actual: series.len(),
        });
    }

    let closes = series.closes();
    let macd = macd_series(
        &closes,
        params.short_window,
        params.long_window,
        params.signal_window,
    );
    let rsi = rsi_series(&closes, params.rsi_window, params.rsi_smoothing);

    let rows = series
        .bars()
        .iter()
        .enumerate()
        .map(|(i, bar)| IndicatorRow {
            date: bar.date,
            close: bar.close,
            ema_short: macd.ema_short[i],
            ema_long: macd.ema_long[i],
            macd: macd.macd[i],
            signal: macd.signal[i],
            histogram: macd.histogram[i],
            rsi: rsi[i],
        })
        .collect::<Vec<_>>();

    debug!(
        symbol = series.symbol(),
        rows = rows.len(),
        short = params.short_window,
        long = params.long_window,
        signal = params.signal_window,
        rsi_window = params.rsi_window,
        "computed indicator table"
    );

    Ok(IndicatorTable {
        params: *params,
        rows,
    })
}

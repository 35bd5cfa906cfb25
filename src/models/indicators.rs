use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::indicators::error::IndicatorError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacdIndicator {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<(u32, u32, u32)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsiIndicator {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmaIndicator {
    pub value: f64,
    pub period: u32,
}

/// How RSI averages gains and losses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsiSmoothing {
    /// Rolling mean over the last `rsi_window` deltas, using however many are
    /// available at the start of the series.
    #[default]
    Simple,
    /// Wilder's recursive smoothing, seeded with the simple mean.
    Wilder,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorParams {
    pub short_window: u32,
    pub long_window: u32,
    pub signal_window: u32,
    pub rsi_window: u32,
    #[serde(default)]
    pub rsi_smoothing: RsiSmoothing,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            short_window: 12,
            long_window: 26,
            signal_window: 9,
            rsi_window: 14,
            rsi_smoothing: RsiSmoothing::Simple,
        }
    }
}

impl IndicatorParams {
    pub fn new(
        short_window: u32,
        long_window: u32,
        signal_window: u32,
        rsi_window: u32,
    ) -> Result<Self, IndicatorError> {
        let params = Self {
            short_window,
            long_window,
            signal_window,
            rsi_window,
            rsi_smoothing: RsiSmoothing::Simple,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_rsi_smoothing(mut self, smoothing: RsiSmoothing) -> Self {
        self.rsi_smoothing = smoothing;
        self
    }

    pub fn validate(&self) -> Result<(), IndicatorError> {
        for (name, window) in [
            ("short_window", self.short_window),
            ("long_window", self.long_window),
            ("signal_window", self.signal_window),
            ("rsi_window", self.rsi_window),
        ] {
            if window == 0 {
                return Err(IndicatorError::InvalidWindow(format!("{} must be >= 1", name)));
            }
        }
        if self.short_window >= self.long_window {
            return Err(IndicatorError::InvalidWindow(format!(
                "short_window ({}) must be less than long_window ({})",
                self.short_window, self.long_window
            )));
        }
        Ok(())
    }
}

/// Indicator values for one date of the series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub date: NaiveDate,
    pub close: f64,
    pub ema_short: f64,
    pub ema_long: f64,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    /// `None` on the first row, where no price delta exists yet.
    pub rsi: Option<f64>,
}

/// Indicator columns aligned row-for-row with the source price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorTable {
    pub params: IndicatorParams,
    pub rows: Vec<IndicatorRow>,
}

impl IndicatorTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&IndicatorRow> {
        self.rows.last()
    }

    pub fn ema_short(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.ema_short).collect()
    }

    pub fn ema_long(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.ema_long).collect()
    }

    pub fn macd(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.macd).collect()
    }

    pub fn signal(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.signal).collect()
    }

    pub fn rsi(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.rsi).collect()
    }
}

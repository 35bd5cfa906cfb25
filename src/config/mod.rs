//! Environment-driven configuration
//!
//! Every setting has a default; values that fail to parse are logged and
//! replaced by the default rather than aborting the run.

use std::env;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

use crate::analysis::performance::{HorizonResolution, PerformanceConfig, DEFAULT_HORIZONS, DEFAULT_LIMIT};
use crate::indicators::error::IndicatorError;
use crate::models::indicators::{IndicatorParams, RsiSmoothing};
use crate::services::yahoo::DEFAULT_BASE_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}

/// Deployment environment (`APP_ENV`), `sandbox` when unset.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub indicators: IndicatorParams,
    pub performance: PerformanceConfig,
    pub filter_below_zero: bool,
    pub yahoo_base_url: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            indicators: IndicatorParams::default(),
            performance: PerformanceConfig::default(),
            filter_below_zero: false,
            yahoo_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = IndicatorParams::default();
        let indicators = IndicatorParams {
            short_window: parse_or(&lookup, "MACD_SHORT_WINDOW", defaults.short_window),
            long_window: parse_or(&lookup, "MACD_LONG_WINDOW", defaults.long_window),
            signal_window: parse_or(&lookup, "MACD_SIGNAL_WINDOW", defaults.signal_window),
            rsi_window: parse_or(&lookup, "RSI_WINDOW", defaults.rsi_window),
            rsi_smoothing: parse_smoothing(&lookup),
        };
        indicators.validate()?;

        let limit = match parse_or(&lookup, "RESULT_LIMIT", DEFAULT_LIMIT) {
            0 => None,
            n => Some(n),
        };
        let performance = PerformanceConfig {
            horizons: parse_horizons(&lookup),
            resolution: parse_resolution(&lookup),
            limit,
        };

        Ok(Self {
            indicators,
            performance,
            filter_below_zero: parse_or(&lookup, "FILTER_BELOW_ZERO", false),
            yahoo_base_url: lookup("YAHOO_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Debug,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, ?default, "invalid config value, using default");
            default
        }),
    }
}

fn parse_smoothing<F>(lookup: &F) -> RsiSmoothing
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("RSI_SMOOTHING").map(|v| v.trim().to_lowercase()).as_deref() {
        None | Some("simple") => RsiSmoothing::Simple,
        Some("wilder") => RsiSmoothing::Wilder,
        Some(other) => {
            warn!(value = other, "unknown RSI_SMOOTHING, using simple");
            RsiSmoothing::Simple
        }
    }
}

fn parse_resolution<F>(lookup: &F) -> HorizonResolution
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("HORIZON_MODE").map(|v| v.trim().to_lowercase()).as_deref() {
        None | Some("calendar") => HorizonResolution::CalendarDays,
        Some("rows") => HorizonResolution::TradingRows,
        Some(other) => {
            warn!(value = other, "unknown HORIZON_MODE, using calendar");
            HorizonResolution::CalendarDays
        }
    }
}

fn parse_horizons<F>(lookup: &F) -> Vec<u32>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup("HORIZONS") else {
        return DEFAULT_HORIZONS.to_vec();
    };

    let parsed: Result<Vec<u32>, _> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<u32>)
        .collect();

    match parsed {
        Ok(mut horizons) if !horizons.is_empty() && !horizons.contains(&0) => {
            horizons.sort_unstable();
            horizons.dedup();
            horizons
        }
        _ => {
            warn!(value = %raw, "invalid HORIZONS, using defaults");
            DEFAULT_HORIZONS.to_vec()
        }
    }
}

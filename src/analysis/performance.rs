//! Forward performance after each crossover event

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::error::AnalysisError;
use crate::models::crossover::CrossoverEvent;
use crate::models::performance::{HorizonOutcome, PerformanceRecord};
use crate::models::series::PriceSeries;

pub const DEFAULT_HORIZONS: [u32; 3] = [7, 14, 30];
pub const DEFAULT_LIMIT: usize = 5;

/// How a forward horizon is turned into a target row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizonResolution {
    /// `event_date + K` calendar days; the exact date must be a trading day
    /// in the series, otherwise the horizon is unavailable.
    #[default]
    CalendarDays,
    /// The K-th row after the event, regardless of calendar gaps.
    TradingRows,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceConfig {
    pub horizons: Vec<u32>,
    pub resolution: HorizonResolution,
    /// Keep only the most recent `limit` records. `None` keeps everything.
    pub limit: Option<usize>,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            horizons: DEFAULT_HORIZONS.to_vec(),
            resolution: HorizonResolution::CalendarDays,
            limit: Some(DEFAULT_LIMIT),
        }
    }
}

impl PerformanceConfig {
    /// Horizons are sorted and de-duplicated; zero is rejected.
    pub fn new(
        horizons: Vec<u32>,
        resolution: HorizonResolution,
        limit: Option<usize>,
    ) -> Result<Self, AnalysisError> {
        if let Some(&zero) = horizons.iter().find(|&&h| h == 0) {
            return Err(AnalysisError::InvalidHorizon(zero));
        }
        let config = Self {
            horizons,
            resolution,
            limit,
        };
        Ok(Self {
            horizons: config.sorted_horizons(),
            ..config
        })
    }

    /// Zero horizons can only arrive through direct construction; they are
    /// dropped with a warning.
    pub fn sorted_horizons(&self) -> Vec<u32> {
        if self.horizons.contains(&0) {
            warn!(horizons = ?self.horizons, "ignoring zero-day horizon");
        }
        let mut horizons: Vec<u32> = self.horizons.iter().copied().filter(|&h| h > 0).collect();
        horizons.sort_unstable();
        horizons.dedup();
        horizons
    }
}

fn add_days(date: NaiveDate, days: u32) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(days as u64))
}

/// Last row index (inclusive) covered by `horizon` from the event at `index`.
fn window_end(series: &PriceSeries, index: usize, horizon: u32, resolution: HorizonResolution) -> usize {
    let last = series.len() - 1;
    match resolution {
        HorizonResolution::TradingRows => (index + horizon as usize).min(last),
        HorizonResolution::CalendarDays => {
            let Some(limit) = series.get(index).and_then(|bar| add_days(bar.date, horizon)) else {
                return last;
            };
            series.bars()[index..]
                .iter()
                .take_while(|bar| bar.date <= limit)
                .count()
                .saturating_sub(1)
                + index
        }
    }
}

fn resolve_horizon(
    series: &PriceSeries,
    index: usize,
    horizon: u32,
    resolution: HorizonResolution,
    close_at_event: f64,
) -> HorizonOutcome {
    match resolution {
        HorizonResolution::CalendarDays => {
            let target = series.get(index).and_then(|bar| add_days(bar.date, horizon));
            match target.and_then(|date| series.position_of(date)) {
                Some(pos) => {
                    let bar = series.bars()[pos];
                    HorizonOutcome::available(horizon, bar.date, bar.close, close_at_event)
                }
                None => HorizonOutcome::unavailable(horizon, target),
            }
        }
        HorizonResolution::TradingRows => match series.get(index + horizon as usize) {
            Some(bar) => HorizonOutcome::available(horizon, bar.date, bar.close, close_at_event),
            None => HorizonOutcome::unavailable(horizon, None),
        },
    }
}

fn locate_event(series: &PriceSeries, event: &CrossoverEvent) -> Option<usize> {
    match series.get(event.index) {
        Some(bar) if bar.date == event.date => Some(event.index),
        _ => series.position_of(event.date),
    }
}

fn measure_event(
    series: &PriceSeries,
    event: &CrossoverEvent,
    index: usize,
    horizons: &[u32],
    resolution: HorizonResolution,
) -> PerformanceRecord {
    let close_at_event = series.bars()[index].close;

    let end = horizons
        .first()
        .map(|&first| window_end(series, index, first, resolution))
        .unwrap_or(index);
    let window = &series.bars()[index..=end];
    let high_after = window.iter().map(|b| b.close).fold(f64::MIN, f64::max);
    let low_after = window.iter().map(|b| b.close).fold(f64::MAX, f64::min);

    let outcomes = horizons
        .iter()
        .map(|&horizon| resolve_horizon(series, index, horizon, resolution, close_at_event))
        .collect();

    PerformanceRecord {
        date: event.date,
        direction: event.direction,
        macd_value: event.macd_value,
        close_at_event,
        high_after,
        low_after,
        max_gain_pct: (high_after - close_at_event) / close_at_event * 100.0,
        max_drawdown_pct: (low_after - close_at_event) / close_at_event * 100.0,
        horizons: outcomes,
    }
}

/// One record per event, most recent first, with no limit applied.
///
/// Horizons without a target row are flagged unavailable instead of being
/// filled in. An event whose date is missing from the series is skipped.
pub fn measure_performance(
    series: &PriceSeries,
    events: &[CrossoverEvent],
    config: &PerformanceConfig,
) -> Vec<PerformanceRecord> {
    let horizons = config.sorted_horizons();

    let mut records: Vec<PerformanceRecord> = events
        .iter()
        .filter_map(|event| {
            let Some(index) = locate_event(series, event) else {
                warn!(date = %event.date, "crossover date not found in price series, skipping");
                return None;
            };
            let record = measure_event(series, event, index, &horizons, config.resolution);
            debug!(
                date = %record.date,
                direction = %record.direction,
                available = record.horizons.iter().filter(|o| o.available).count(),
                "measured crossover performance"
            );
            Some(record)
        })
        .collect();

    records.sort_by(|a, b| b.date.cmp(&a.date));
    records
}

/// Keep the `limit` most recent records of a newest-first list.
pub fn limit_records(mut records: Vec<PerformanceRecord>, limit: Option<usize>) -> Vec<PerformanceRecord> {
    if let Some(limit) = limit {
        records.truncate(limit);
    }
    records
}

/// `measure_performance` truncated to `config.limit`.
pub fn analyze_performance(
    series: &PriceSeries,
    events: &[CrossoverEvent],
    config: &PerformanceConfig,
) -> Vec<PerformanceRecord> {
    limit_records(measure_performance(series, events, config), config.limit)
}

/// Calendar-day horizons with an explicit result limit.
pub fn analyze_performance_with(
    series: &PriceSeries,
    events: &[CrossoverEvent],
    horizons: &[u32],
    limit: usize,
) -> Vec<PerformanceRecord> {
    let config = PerformanceConfig {
        horizons: horizons.to_vec(),
        resolution: HorizonResolution::CalendarDays,
        limit: Some(limit),
    };
    analyze_performance(series, events, &config)
}

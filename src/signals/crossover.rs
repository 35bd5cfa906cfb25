//! MACD / signal-line crossover detection

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::crossover::{CrossoverDirection, CrossoverEvent};
use crate::models::indicators::{IndicatorRow, IndicatorTable};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossoverFilter {
    /// Keep only bullish crossings that happen while MACD is still negative.
    pub below_zero_only: bool,
}

impl CrossoverFilter {
    pub fn below_zero() -> Self {
        Self {
            below_zero_only: true,
        }
    }

    fn accepts(&self, direction: CrossoverDirection, macd: f64) -> bool {
        match direction {
            CrossoverDirection::Bullish if self.below_zero_only => macd < 0.0,
            _ => true,
        }
    }
}

/// Crossing between two consecutive rows, if any.
///
/// The previous row must be strictly on one side of the signal line; the
/// current row may sit exactly on it. A flat touch therefore fires once.
pub fn crossing_between(prev: &IndicatorRow, curr: &IndicatorRow) -> Option<CrossoverDirection> {
    if prev.macd < prev.signal && curr.macd >= curr.signal {
        Some(CrossoverDirection::Bullish)
    } else if prev.macd > prev.signal && curr.macd <= curr.signal {
        Some(CrossoverDirection::Bearish)
    } else {
        None
    }
}

/// Scan the table pairwise and return crossovers in chronological order.
pub fn detect_with_filter(table: &IndicatorTable, filter: CrossoverFilter) -> Vec<CrossoverEvent> {
    let events: Vec<CrossoverEvent> = table
        .rows
        .windows(2)
        .enumerate()
        .filter_map(|(i, pair)| {
            let (prev, curr) = (&pair[0], &pair[1]);
            let direction = crossing_between(prev, curr)?;
            if !filter.accepts(direction, curr.macd) {
                return None;
            }
            Some(CrossoverEvent {
                date: curr.date,
                index: i + 1,
                direction,
                macd_value: curr.macd,
                signal_value: curr.signal,
                close_price: curr.close,
            })
        })
        .collect();

    debug!(
        events = events.len(),
        below_zero_only = filter.below_zero_only,
        "detected crossovers"
    );

    events
}

pub fn detect_crossovers(table: &IndicatorTable, filter_below_zero: bool) -> Vec<CrossoverEvent> {
    detect_with_filter(
        table,
        CrossoverFilter {
            below_zero_only: filter_below_zero,
        },
    )
}

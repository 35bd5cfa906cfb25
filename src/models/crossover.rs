use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrossoverDirection {
    Bullish,
    Bearish,
}

impl fmt::Display for CrossoverDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrossoverDirection::Bullish => write!(f, "Bullish"),
            CrossoverDirection::Bearish => write!(f, "Bearish"),
        }
    }
}

/// MACD crossing its signal line between two consecutive rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossoverEvent {
    pub date: NaiveDate,
    /// Row position in the series the event was detected on.
    pub index: usize,
    pub direction: CrossoverDirection,
    pub macd_value: f64,
    pub signal_value: f64,
    pub close_price: f64,
}

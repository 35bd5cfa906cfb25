use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::crossover::CrossoverDirection;

/// Price outcome at one forward horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonOutcome {
    pub horizon: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    pub close_after: Option<f64>,
    pub pct_change: Option<f64>,
    pub available: bool,
}

impl HorizonOutcome {
    pub fn available(horizon: u32, target_date: NaiveDate, close_after: f64, close_at_event: f64) -> Self {
        Self {
            horizon,
            target_date: Some(target_date),
            close_after: Some(close_after),
            pct_change: Some((close_after - close_at_event) / close_at_event * 100.0),
            available: true,
        }
    }

    pub fn unavailable(horizon: u32, target_date: Option<NaiveDate>) -> Self {
        Self {
            horizon,
            target_date,
            close_after: None,
            pct_change: None,
            available: false,
        }
    }
}

/// Forward performance measured after one crossover event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub date: NaiveDate,
    pub direction: CrossoverDirection,
    pub macd_value: f64,
    pub close_at_event: f64,
    pub high_after: f64,
    pub low_after: f64,
    pub max_gain_pct: f64,
    pub max_drawdown_pct: f64,
    pub horizons: Vec<HorizonOutcome>,
}

impl PerformanceRecord {
    pub fn outcome(&self, horizon: u32) -> Option<&HorizonOutcome> {
        self.horizons.iter().find(|o| o.horizon == horizon)
    }

    pub fn pct_change(&self, horizon: u32) -> Option<f64> {
        self.outcome(horizon).and_then(|o| o.pct_change)
    }

    pub fn is_available(&self, horizon: u32) -> bool {
        self.outcome(horizon).map(|o| o.available).unwrap_or(false)
    }
}

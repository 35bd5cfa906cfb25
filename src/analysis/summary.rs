//! Aggregate view over performance records

use serde::{Deserialize, Serialize};

use crate::models::crossover::CrossoverDirection;
use crate::models::performance::PerformanceRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonStats {
    pub direction: CrossoverDirection,
    pub horizon: u32,
    /// Records with data available at this horizon.
    pub samples: usize,
    pub mean_pct_change: Option<f64>,
    /// Fraction of samples with a positive change.
    pub positive_share: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub stats: Vec<HorizonStats>,
}

impl PerformanceSummary {
    pub fn get(&self, direction: CrossoverDirection, horizon: u32) -> Option<&HorizonStats> {
        self.stats
            .iter()
            .find(|s| s.direction == direction && s.horizon == horizon)
    }
}

pub fn summarize(records: &[PerformanceRecord], horizons: &[u32]) -> PerformanceSummary {
    let mut stats = Vec::with_capacity(horizons.len() * 2);

    for direction in [CrossoverDirection::Bullish, CrossoverDirection::Bearish] {
        for &horizon in horizons {
            let changes: Vec<f64> = records
                .iter()
                .filter(|r| r.direction == direction)
                .filter_map(|r| r.pct_change(horizon))
                .collect();

            let samples = changes.len();
            let (mean_pct_change, positive_share) = if samples == 0 {
                (None, None)
            } else {
                let mean = changes.iter().sum::<f64>() / samples as f64;
                let positive = changes.iter().filter(|&&c| c > 0.0).count();
                (Some(mean), Some(positive as f64 / samples as f64))
            };

            stats.push(HorizonStats {
                direction,
                horizon,
                samples,
                mean_pct_change,
                positive_share,
            });
        }
    }

    PerformanceSummary { stats }
}

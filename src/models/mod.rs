//! Shared data models spanning the pipeline stages.

pub mod crossover;
pub mod indicators;
pub mod performance;
pub mod series;

pub use crossover::{CrossoverDirection, CrossoverEvent};
pub use indicators::{
    EmaIndicator, IndicatorParams, IndicatorRow, IndicatorTable, MacdIndicator, RsiIndicator,
    RsiSmoothing,
};
pub use performance::{HorizonOutcome, PerformanceRecord};
pub use series::{PriceBar, PriceSeries, SeriesError};

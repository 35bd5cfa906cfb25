pub mod engine;
pub mod error;

pub mod momentum;
pub mod trend;

pub use engine::{compute_indicators, MIN_PRICES};
pub use error::IndicatorError;

//! MACD / RSI crossover analysis for daily price series.
//!
//! Pipeline: `PriceSource` → `compute_indicators` → `detect_crossovers` →
//! `analyze_performance` → `ReportSink`.

pub mod analysis;
pub mod config;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod report;
pub mod services;
pub mod signals;

pub use analysis::{analyze_performance, AnalysisPipeline, AnalysisReport, AnalysisRequest};
pub use indicators::compute_indicators;
pub use signals::detect_crossovers;

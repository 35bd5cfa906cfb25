//! Crossover performance analysis and the end-to-end pipeline.

pub mod error;
pub mod performance;
pub mod pipeline;
pub mod summary;

pub use error::AnalysisError;
pub use performance::{
    analyze_performance, analyze_performance_with, limit_records, measure_performance,
    HorizonResolution, PerformanceConfig,
};
pub use pipeline::{AnalysisPipeline, AnalysisReport, AnalysisRequest};
pub use summary::{summarize, HorizonStats, PerformanceSummary};

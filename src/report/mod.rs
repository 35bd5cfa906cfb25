//! Presentation sinks for analysis reports.

pub mod json;
pub mod table;

use thiserror::Error;

use crate::analysis::pipeline::AnalysisReport;

pub use json::JsonSink;
pub use table::TableSink;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Anything that can display a finished analysis.
pub trait ReportSink {
    fn write_report(&mut self, report: &AnalysisReport) -> Result<(), ReportError>;
}

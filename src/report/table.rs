//! Plain-text rendering of the performance table

use std::io::Write;

use super::{ReportError, ReportSink};
use crate::analysis::pipeline::AnalysisReport;
use crate::models::performance::PerformanceRecord;

const NOT_AVAILABLE: &str = "N/A";

pub struct TableSink<W: Write> {
    writer: W,
}

impl<W: Write> TableSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_header(&mut self, report: &AnalysisReport) -> Result<(), ReportError> {
        writeln!(
            self.writer,
            "{} {} .. {} ({} rows, {} crossovers)",
            report.symbol,
            report.start,
            report.end,
            report.indicators.len(),
            report.events.len()
        )?;

        if let Some(last) = report.indicators.last() {
            let rsi = last
                .rsi
                .map(|v| format!("{:.2}", v))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            writeln!(
                self.writer,
                "latest {}: close {:.2}  MACD {:.4}  signal {:.4}  RSI {}",
                last.date, last.close, last.macd, last.signal, rsi
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_records(&mut self, report: &AnalysisReport) -> Result<(), ReportError> {
        if report.performance.is_empty() {
            writeln!(self.writer, "no crossovers detected")?;
            return Ok(());
        }

        let mut header = format!(
            "{:<10}  {:<8}  {:>9}  {:>10}  {:>10}  {:>10}",
            "date", "signal", "macd", "close", "high", "low"
        );
        for horizon in &report.horizons {
            header.push_str(&format!("  {:>8}", format!("{}d %", horizon)));
        }
        writeln!(self.writer, "{}", header)?;

        for record in &report.performance {
            writeln!(self.writer, "{}", format_record(record, &report.horizons))?;
        }
        Ok(())
    }

    fn write_summary(&mut self, report: &AnalysisReport) -> Result<(), ReportError> {
        writeln!(self.writer)?;
        for stats in report.summary.stats.iter().filter(|s| s.samples > 0) {
            let mean = stats.mean_pct_change.unwrap_or_default();
            let positive = stats.positive_share.unwrap_or_default() * 100.0;
            writeln!(
                self.writer,
                "{:<8} {:>3}d: n={:<3} mean {:+.2}%  positive {:.0}%",
                stats.direction.to_string(),
                stats.horizon,
                stats.samples,
                mean,
                positive
            )?;
        }
        Ok(())
    }
}

fn format_record(record: &PerformanceRecord, horizons: &[u32]) -> String {
    let mut line = format!(
        "{:<10}  {:<8}  {:>9.4}  {:>10.2}  {:>10.2}  {:>10.2}",
        record.date.format("%Y-%m-%d").to_string(),
        record.direction.to_string(),
        record.macd_value,
        record.close_at_event,
        record.high_after,
        record.low_after
    );
    for &horizon in horizons {
        let cell = record
            .pct_change(horizon)
            .map(|pct| format!("{:+.2}", pct))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        line.push_str(&format!("  {:>8}", cell));
    }
    line
}

impl<W: Write> ReportSink for TableSink<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> Result<(), ReportError> {
        self.write_header(report)?;
        self.write_records(report)?;
        self.write_summary(report)?;
        self.writer.flush()?;
        Ok(())
    }
}

//! One analysis run: fetch, indicators, crossovers, forward performance

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, info_span};

use crate::analysis::error::AnalysisError;
use crate::analysis::performance::{limit_records, measure_performance};
use crate::analysis::summary::{summarize, PerformanceSummary};
use crate::config::AnalysisConfig;
use crate::indicators::compute_indicators;
use crate::models::crossover::CrossoverEvent;
use crate::models::indicators::IndicatorTable;
use crate::models::performance::PerformanceRecord;
use crate::models::series::PriceSeries;
use crate::services::market_data::PriceSource;
use crate::signals::crossover::{detect_with_filter, CrossoverFilter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Overrides the configured sub-zero filter for this run.
    pub filter_below_zero: Option<bool>,
}

impl AnalysisRequest {
    pub fn new(symbol: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            start,
            end,
            filter_below_zero: None,
        }
    }

    pub fn with_filter_below_zero(mut self, enabled: bool) -> Self {
        self.filter_below_zero = Some(enabled);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub horizons: Vec<u32>,
    pub indicators: IndicatorTable,
    pub events: Vec<CrossoverEvent>,
    pub performance: Vec<PerformanceRecord>,
    pub summary: PerformanceSummary,
}

pub struct AnalysisPipeline {
    source: Arc<dyn PriceSource>,
    config: AnalysisConfig,
}

impl AnalysisPipeline {
    pub fn new(source: Arc<dyn PriceSource>, config: AnalysisConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Fetch once, then recompute every stage from scratch.
    pub async fn run(&self, request: &AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        if request.start > request.end {
            return Err(AnalysisError::InvalidRange {
                start: request.start,
                end: request.end,
            });
        }

        let series = self
            .source
            .fetch(&request.symbol, request.start, request.end)
            .await?;

        let filter = CrossoverFilter {
            below_zero_only: request
                .filter_below_zero
                .unwrap_or(self.config.filter_below_zero),
        };
        let mut report = self.analyze_series(&series, filter)?;
        report.start = request.start;
        report.end = request.end;
        Ok(report)
    }

    /// Run the synchronous stages over an already fetched series.
    pub fn analyze_series(
        &self,
        series: &PriceSeries,
        filter: CrossoverFilter,
    ) -> Result<AnalysisReport, AnalysisError> {
        let span = info_span!("analysis", symbol = series.symbol());
        let _guard = span.enter();

        let indicators = compute_indicators(series, &self.config.indicators)?;
        let events = detect_with_filter(&indicators, filter);
        let records = measure_performance(series, &events, &self.config.performance);
        let horizons = self.config.performance.sorted_horizons();
        // Aggregates cover every crossover; the limit only trims the listing.
        let summary = summarize(&records, &horizons);
        let performance = limit_records(records, self.config.performance.limit);

        info!(
            rows = indicators.len(),
            events = events.len(),
            records = performance.len(),
            below_zero_only = filter.below_zero_only,
            "analysis complete"
        );

        Ok(AnalysisReport {
            symbol: series.symbol().to_string(),
            start: series.first_date(),
            end: series.last_date(),
            horizons,
            indicators,
            events,
            performance,
            summary,
        })
    }
}

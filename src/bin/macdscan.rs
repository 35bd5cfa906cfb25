//! macdscan
//!
//! Fetches daily closes for one symbol, computes MACD/RSI, detects signal-line
//! crossovers and prints their forward performance.
//!
//! Inputs come from the environment (or `.env`): SYMBOL, START_DATE, END_DATE
//! (YYYY-MM-DD), OUTPUT (`table` or `json`), plus the settings read by
//! `AnalysisConfig::from_env`.

use chrono::{Days, NaiveDate, Utc};
use dotenvy::dotenv;
use macdscan::analysis::{AnalysisPipeline, AnalysisRequest};
use macdscan::config::{self, AnalysisConfig};
use macdscan::logging;
use macdscan::report::{JsonSink, ReportSink, TableSink};
use macdscan::services::YahooPriceSource;
use std::env;
use std::io;
use std::sync::Arc;
use tracing::{error, info};

fn date_from_env(key: &str, default: NaiveDate) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match env::var(key) {
        Ok(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|e| format!("{} must be YYYY-MM-DD, got '{}': {}", key, raw, e).into()),
        Err(_) => Ok(default),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let today = Utc::now().date_naive();
    let default_start = today.checked_sub_days(Days::new(365)).unwrap_or(today);

    let symbol = env::var("SYMBOL").unwrap_or_else(|_| "AAPL".to_string());
    let start = date_from_env("START_DATE", default_start)?;
    let end = date_from_env("END_DATE", today)?;
    let output = env::var("OUTPUT").unwrap_or_else(|_| "table".to_string());

    let config = AnalysisConfig::from_env()?;
    info!(environment = %config::get_environment(), "Starting macdscan");
    info!(
        symbol = %symbol,
        %start,
        %end,
        horizons = ?config.performance.horizons,
        resolution = ?config.performance.resolution,
        "Analysis request"
    );

    let source = Arc::new(YahooPriceSource::with_base_url(config.yahoo_base_url.clone()));
    let pipeline = AnalysisPipeline::new(source, config);
    let request = AnalysisRequest::new(symbol, start, end);

    let report = match pipeline.run(&request).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "analysis failed");
            return Err(e.into());
        }
    };

    let stdout = io::stdout();
    match output.as_str() {
        "json" => JsonSink::new(stdout.lock()).write_report(&report)?,
        _ => TableSink::new(stdout.lock()).write_report(&report)?,
    }

    Ok(())
}

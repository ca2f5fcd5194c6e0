//! Run configuration
//!
//! Defaults reproduce the classic SPY study; environment variables (optionally
//! loaded from `.env`) override individual fields.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::api::yahoo::PriceField;
use crate::services::chart_service::HISTOGRAM_BINS;
use crate::utils::errors::AnalysisError;

pub const DEFAULT_TICKER: &str = "SPY";
pub const DEFAULT_START_DATE: &str = "2000-01-01";
pub const DEFAULT_OUTPUT: &str = "fat_tail_analysis.png";

/// Parameters for a single analysis run
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub output_path: PathBuf,
    pub bins: usize,
    pub price_field: PriceField,
    /// Open the saved chart in a viewer when a display is present
    pub show_chart: bool,
    /// Market data endpoint override
    pub base_url: Option<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ticker: DEFAULT_TICKER.to_string(),
            start_date: NaiveDate::parse_from_str(DEFAULT_START_DATE, "%Y-%m-%d").unwrap_or_default(),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            bins: HISTOGRAM_BINS,
            price_field: PriceField::default(),
            show_chart: true,
            base_url: None,
        }
    }
}

impl AnalysisConfig {
    pub fn new(ticker: &str, start_date: NaiveDate) -> Result<Self, AnalysisError> {
        Ok(Self {
            ticker: normalize_ticker(ticker)?,
            start_date,
            ..Self::default()
        })
    }

    /// Defaults overridden by `FAT_TAIL_*` and `YAHOO_BASE_URL` variables
    pub fn from_env() -> Result<Self, AnalysisError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AnalysisError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(ticker) = lookup("FAT_TAIL_TICKER") {
            config.ticker = normalize_ticker(&ticker)?;
        }
        if let Some(date) = lookup("FAT_TAIL_START_DATE") {
            config.start_date = parse_date(&date)?;
        }
        if let Some(field) = lookup("FAT_TAIL_PRICE_FIELD") {
            config.price_field = parse_price_field(&field)?;
        }
        if let Some(output) = lookup("FAT_TAIL_OUTPUT") {
            if output.trim().is_empty() {
                return Err(AnalysisError::Config("FAT_TAIL_OUTPUT cannot be empty".to_string()));
            }
            config.output_path = PathBuf::from(output.trim());
        }
        if let Some(show) = lookup("FAT_TAIL_SHOW_CHART") {
            config.show_chart = parse_flag("FAT_TAIL_SHOW_CHART", &show)?;
        }
        if let Some(url) = lookup("YAHOO_BASE_URL") {
            let url = url.trim();
            if !url.is_empty() {
                config.base_url = Some(url.to_string());
            }
        }

        Ok(config)
    }
}

fn normalize_ticker(ticker: &str) -> Result<String, AnalysisError> {
    let ticker = ticker.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(AnalysisError::Config("Ticker symbol cannot be empty".to_string()));
    }
    Ok(ticker)
}

fn parse_date(value: &str) -> Result<NaiveDate, AnalysisError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        AnalysisError::Config(format!("Invalid start date '{}' (expected YYYY-MM-DD): {}", value, e))
    })
}

fn parse_price_field(value: &str) -> Result<PriceField, AnalysisError> {
    match value.trim().to_lowercase().as_str() {
        "close" => Ok(PriceField::Close),
        "adjclose" | "adj_close" | "adjusted" => Ok(PriceField::AdjustedClose),
        other => Err(AnalysisError::Config(format!(
            "FAT_TAIL_PRICE_FIELD must be 'close' or 'adjclose', got '{}'",
            other
        ))),
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, AnalysisError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AnalysisError::Config(format!("{} must be true or false, got '{}'", key, other))),
    }
}

use thiserror::Error;

use crate::api::yahoo::ApiError;

/// Errors that abort an analysis run
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Market data provider error: {0}")]
    Provider(#[from] ApiError),
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
    #[error("Invalid price series: {0}")]
    InvalidSeries(String),
    #[error("Chart rendering failed: {0}")]
    Chart(String),
    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AnalysisError {
    /// True for failures that happened before any computation started
    pub fn is_provider_error(&self) -> bool {
        matches!(self, AnalysisError::Provider(_))
    }
}

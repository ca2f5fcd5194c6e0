use serde::Deserialize;

/// Top-level body of the v8 chart endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartEnvelope,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartEnvelope {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

/// Error object the provider embeds instead of a result
#[derive(Debug, Clone, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    pub meta: Option<ChartMeta>,
    /// Absent when the requested range holds no sessions
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartMeta {
    /// Exchange offset from UTC in seconds
    pub gmtoffset: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Indicators {
    pub quote: Vec<QuoteIndicator>,
    pub adjclose: Option<Vec<AdjCloseIndicator>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteIndicator {
    pub close: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdjCloseIndicator {
    pub adjclose: Option<Vec<Option<f64>>>,
}

/// Which daily close column to build the price series from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceField {
    /// Raw session close
    Close,
    /// Close adjusted for splits and dividends
    #[default]
    AdjustedClose,
}

/// Comprehensive error type for market data requests
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Request could not be built from the given arguments
    InvalidRequest(String),
    /// Requested range cannot contain any sessions
    InsufficientHistory(String),
    /// 404, usually an unknown symbol
    NotFound(String),
    /// 5xx Server Error
    ServerError(i32, String),
    /// Other HTTP errors
    HttpError(i32, String),
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
    /// Error object reported by the provider
    Provider { code: String, description: String },
    /// Response held no prices
    NoData,
    /// Response parsed but its layout is not one we can trust
    UnexpectedShape(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "Invalid Request: {}", msg),
            ApiError::InsufficientHistory(msg) => write!(f, "Insufficient History: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::ServerError(code, msg) => write!(f, "Server Error ({}): {}", code, msg),
            ApiError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ApiError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ApiError::DeserializationError(msg) => write!(f, "Deserialization Error: {}", msg),
            ApiError::Provider { code, description } => {
                write!(f, "Provider Error [{}]: {}", code, description)
            }
            ApiError::NoData => write!(f, "No data returned"),
            ApiError::UnexpectedShape(msg) => write!(f, "Unexpected Response Shape: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use reqwest::header::USER_AGENT;
use reqwest::Client as HttpClient;
use tracing::{debug, info, warn};

use super::models::{ApiError, ChartResponse, PriceField};
use crate::api::PriceSource;
use crate::models::{PricePoint, PriceSeries};
use crate::utils::errors::AnalysisError;

/// Yahoo Finance chart API client for daily price history
pub struct YahooClient {
    http_client: HttpClient,
    base_url: String,
    price_field: PriceField,
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooClient {
    const DEFAULT_BASE_URL: &'static str = "https://query1.finance.yahoo.com/v8/finance/chart";
    // The endpoint rejects requests without a browser-like agent
    const BROWSER_AGENT: &'static str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
    // Largest exchange offset east of UTC (UTC+14)
    const MAX_GMT_OFFSET_SECS: i64 = 14 * 3600;

    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL.to_string())
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            price_field: PriceField::default(),
        }
    }

    /// Choose the close column used for the series
    pub fn with_price_field(mut self, price_field: PriceField) -> Self {
        self.price_field = price_field;
        self
    }

    /// Build the daily history URL for `[start, end]` in unix seconds
    fn build_url(&self, symbol: &str, start: i64, end: i64) -> String {
        format!(
            "{}/{}?period1={}&period2={}&interval=1d&events=history",
            self.base_url, symbol, start, end
        )
    }

    /// Request lower bound early enough that a session on `start` in any
    /// timezone is included
    fn period_start(start: NaiveDate) -> Option<i64> {
        let midnight = start.and_hms_opt(0, 0, 0)?;
        Some(Utc.from_utc_datetime(&midnight).timestamp() - Self::MAX_GMT_OFFSET_SECS)
    }

    /// Map a non-2xx response to an error, using the provider's error object when present
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        let provider_error = serde_json::from_str::<ChartResponse>(&body_text)
            .ok()
            .and_then(|body| body.chart.error);

        match (status_code, provider_error) {
            (404, Some(err)) => ApiError::NotFound(err.description),
            (404, None) => ApiError::NotFound(body_text),
            (_, Some(err)) => ApiError::Provider {
                code: err.code,
                description: err.description,
            },
            (500..=599, None) => {
                warn!("Server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code as i32, body_text)
            }
            (_, None) => ApiError::HttpError(status_code as i32, body_text),
        }
    }

    /// GET /{symbol}
    ///
    /// Retrieves daily closes from `start` (inclusive) through now.
    ///
    /// # Returns
    /// * `Ok(PriceSeries)` - Non-empty, chronologically ordered closes
    /// * `Err(ApiError)` - Invalid arguments, transport failure or an unusable response
    pub async fn get_daily_history(
        &self,
        symbol: &str,
        start: NaiveDate,
    ) -> Result<PriceSeries, ApiError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(ApiError::InvalidRequest("Ticker symbol cannot be empty".to_string()));
        }

        let now = Utc::now();
        let today = now.date_naive();
        if start > today {
            return Err(ApiError::InsufficientHistory(format!(
                "start date {} is after today ({})",
                start, today
            )));
        }

        let period1 = Self::period_start(start)
            .ok_or_else(|| ApiError::InvalidRequest(format!("Invalid start date: {}", start)))?;
        let url = self.build_url(symbol, period1, now.timestamp());

        debug!("Requesting price history: {}", url);

        let response = self
            .http_client
            .get(&url)
            .header(USER_AGENT, Self::BROWSER_AGENT)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::RequestError(format!("Failed to read response: {}", e)))?;

        let series = parse_chart(&body, self.price_field)?;
        retain_from(&series, start)
    }
}

impl PriceSource for YahooClient {
    async fn fetch_prices(&self, symbol: &str, start: NaiveDate) -> Result<PriceSeries, AnalysisError> {
        info!("📥 Fetching daily prices for {} since {}", symbol, start);
        let series = self.get_daily_history(symbol, start).await?;
        info!(
            "Fetched {} prices ({:?} to {:?})",
            series.len(),
            series.first_date(),
            series.last_date()
        );
        Ok(series)
    }
}

/// Parse a chart endpoint body into a price series
///
/// Sessions the provider reports with a null price are skipped; any other
/// irregularity fails the whole response.
pub fn parse_chart(body: &str, price_field: PriceField) -> Result<PriceSeries, ApiError> {
    let response: ChartResponse = serde_json::from_str(body)
        .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

    if let Some(err) = response.chart.error {
        return Err(ApiError::Provider {
            code: err.code,
            description: err.description,
        });
    }

    let results = response.chart.result.ok_or(ApiError::NoData)?;
    if results.len() > 1 {
        return Err(ApiError::UnexpectedShape(format!(
            "expected a single result, got {}",
            results.len()
        )));
    }
    let data = results.into_iter().next().ok_or(ApiError::NoData)?;

    let timestamps = match data.timestamp {
        Some(ts) if !ts.is_empty() => ts,
        _ => return Err(ApiError::NoData),
    };

    let raw_close = data
        .indicators
        .quote
        .into_iter()
        .next()
        .and_then(|q| q.close);
    let adjusted_close = data
        .indicators
        .adjclose
        .and_then(|a| a.into_iter().next())
        .and_then(|a| a.adjclose);

    let prices = match (price_field, adjusted_close) {
        (PriceField::AdjustedClose, Some(adjusted)) => adjusted,
        (PriceField::AdjustedClose, None) => {
            debug!("No adjusted closes in response, using raw closes");
            raw_close.ok_or(ApiError::NoData)?
        }
        (PriceField::Close, _) => raw_close.ok_or(ApiError::NoData)?,
    };

    if prices.len() != timestamps.len() {
        return Err(ApiError::UnexpectedShape(format!(
            "{} timestamps but {} prices",
            timestamps.len(),
            prices.len()
        )));
    }

    let gmt_offset = data.meta.and_then(|m| m.gmtoffset).unwrap_or(0);

    let mut points = Vec::with_capacity(prices.len());
    let mut skipped = 0usize;
    for (timestamp, price) in timestamps.into_iter().zip(prices) {
        let Some(close) = price else {
            skipped += 1;
            continue;
        };
        let date = DateTime::from_timestamp(timestamp + gmt_offset, 0)
            .ok_or_else(|| ApiError::UnexpectedShape(format!("Invalid timestamp: {}", timestamp)))?
            .date_naive();
        points.push(PricePoint::new(date, close));
    }

    if skipped > 0 {
        warn!("Skipped {} sessions without a price", skipped);
    }

    if points.is_empty() {
        return Err(ApiError::NoData);
    }

    PriceSeries::new(points).map_err(|e| ApiError::UnexpectedShape(e.to_string()))
}

/// Drop sessions dated before `start` (local exchange date)
pub fn retain_from(series: &PriceSeries, start: NaiveDate) -> Result<PriceSeries, ApiError> {
    let points: Vec<PricePoint> = series
        .points()
        .iter()
        .copied()
        .filter(|p| p.date >= start)
        .collect();

    if points.is_empty() {
        return Err(ApiError::NoData);
    }

    PriceSeries::new(points).map_err(|e| ApiError::UnexpectedShape(e.to_string()))
}

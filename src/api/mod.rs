pub mod yahoo;

use chrono::NaiveDate;

use crate::models::PriceSeries;
use crate::utils::errors::AnalysisError;

/// Anything that can supply a daily close history for a symbol
#[allow(async_fn_in_trait)]
pub trait PriceSource {
    /// Closing prices from `start` (inclusive) through today
    async fn fetch_prices(&self, symbol: &str, start: NaiveDate) -> Result<PriceSeries, AnalysisError>;
}

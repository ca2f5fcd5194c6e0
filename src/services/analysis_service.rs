use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::api::PriceSource;
use crate::config::AnalysisConfig;
use crate::models::{ChartRequest, Moments, PriceSeries, ReturnSeries};
use crate::services::chart_service::ChartRenderer;
use crate::services::distribution_service::analyze_distribution;
use crate::services::returns_service::calculate_returns;
use crate::utils::display::{display_available, open_in_viewer};
use crate::utils::errors::AnalysisError;

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub ticker: String,
    pub price_count: usize,
    pub returns: ReturnSeries,
    pub moments: Moments,
    pub output_path: PathBuf,
    pub image_bytes: usize,
}

/// Returns and moments for an already fetched price series
pub fn summarize(prices: &PriceSeries) -> Result<(ReturnSeries, Moments), AnalysisError> {
    let returns = calculate_returns(prices)?;
    let moments = analyze_distribution(&returns)?;
    Ok((returns, moments))
}

/// Fetch, summarize, render and save
///
/// Stops at the first failing stage; nothing is written unless every earlier
/// stage succeeded.
pub async fn run_analysis<S, R>(
    config: &AnalysisConfig,
    source: &S,
    renderer: &R,
) -> Result<AnalysisReport, AnalysisError>
where
    S: PriceSource,
    R: ChartRenderer,
{
    println!("--- Starting Analysis for {} ---", config.ticker);

    let prices = source.fetch_prices(&config.ticker, config.start_date).await?;
    let (returns, moments) = summarize(&prices)?;
    info!(
        "📊 {} returns: mean {:.6}%, std dev {:.6}%",
        returns.len(),
        moments.mean,
        moments.std_dev
    );

    println!("Mean Return: {:.4}%", moments.mean);
    println!("Volatility: {:.4}%", moments.std_dev);

    let request = ChartRequest {
        label: &config.ticker,
        returns: &returns,
        moments,
        bins: config.bins,
    };
    let image = renderer.render(&request)?;
    std::fs::write(&config.output_path, &image)?;
    debug!("Wrote {} bytes to {}", image.len(), config.output_path.display());
    println!("Chart saved as '{}'", config.output_path.display());

    if config.show_chart {
        if display_available() {
            if let Err(e) = open_in_viewer(&config.output_path) {
                warn!("Could not open chart viewer: {}", e);
            }
        } else {
            debug!("No display available, skipping chart viewer");
        }
    }

    Ok(AnalysisReport {
        ticker: config.ticker.clone(),
        price_count: prices.len(),
        returns,
        moments,
        output_path: config.output_path.clone(),
        image_bytes: image.len(),
    })
}

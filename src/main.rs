use std::process::ExitCode;

use tracing::{error, info, warn};

mod api;
mod config;
mod models;
mod services;
mod utils;

use api::yahoo::YahooClient;
use config::AnalysisConfig;
use services::analysis_service::run_analysis;
use services::chart_service::PlottersRenderer;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    // Initialize tracing on stderr, stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(utils::logging::env_filter())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = match AnalysisConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Fat tail analysis for {} since {} -> {}",
        config.ticker,
        config.start_date,
        config.output_path.display()
    );

    let client = match &config.base_url {
        Some(url) => YahooClient::with_base_url(url.clone()),
        None => YahooClient::new(),
    }
    .with_price_field(config.price_field);

    match run_analysis(&config, &client, &PlottersRenderer::default()).await {
        Ok(report) => {
            info!(
                "Analysis complete: {} prices, {} returns, {} byte chart at {}",
                report.price_count,
                report.returns.len(),
                report.image_bytes,
                report.output_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Analysis failed: {}", e);
            if e.is_provider_error() {
                warn!("Check the ticker symbol and network access to the market data provider");
            }
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

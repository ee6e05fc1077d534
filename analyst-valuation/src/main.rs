//! Analyst Valuation - Automated stock valuation service for the Analyst
//! ecosystem.
//!
//! Applies DCF, PEG, P/E, and peer-comparative valuation methods to a
//! resolved financial snapshot and synthesizes a recommendation.

use analyst_common::config::Config;
use analyst_common::logging::init_logging;
use analyst_valuation::ValuationService;
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Start timing immediately for cold-start measurement
    let startup_start = std::time::Instant::now();

    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    init_logging(
        &config.observability.log_level,
        &config.observability.log_format,
    );

    tracing::info!("Analyst Valuation v{}", env!("CARGO_PKG_VERSION"));

    // Start the valuation service
    let service = ValuationService::new(config);

    // Log startup timing before entering the serve loop
    let startup_duration = startup_start.elapsed();
    tracing::info!(
        duration_ms = startup_duration.as_millis() as u64,
        "Service initialized in {:?}",
        startup_duration
    );

    service.start().await
}

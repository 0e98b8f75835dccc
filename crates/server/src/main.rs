//! Simple test harness for the recommendation orchestrator.
//!
//! Loads the artifacts described by `PRODUCT_RECS_*` (degraded if they
//! cannot be loaded), answers the reference request and prints the JSON
//! response.

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use server::{RecommendationOrchestrator, ServiceConfig};
use sources::sample;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServiceConfig::from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    info!("Starting product recommendation test harness");

    let paths = config.artifact_paths();
    let orchestrator = RecommendationOrchestrator::load_or_degraded(&paths);
    if orchestrator.is_degraded() {
        warn!("Running degraded: every request will get the generic error response");
    } else if !orchestrator.has_history() {
        warn!("Running without engagement history: cumulative counts are 0");
    }

    let request = sample::reference_request();
    info!("Sending reference request for user {}", sample::SAMPLE_CUSTOMER_ID);
    let response = orchestrator.handle_async(request).await;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

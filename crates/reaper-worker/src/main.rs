//! Reaction reaper worker entry point
//!
//! Run with:
//! ```bash
//! cargo run -p reaper-worker
//! ```
//!
//! Configuration is loaded from environment variables.

use reaper_common::{init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing
    if let Err(e) = init_tracing(&TracingConfig::from_env()) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    // Run the worker
    if let Err(e) = run().await {
        error!(error = %e, "Worker failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting reaction reaper worker...");

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        reactions = %config.channels.reactions,
        timebomb = %config.channels.timebomb,
        default_ttl = config.relay.default_ttl_seconds,
        "Configuration loaded"
    );

    let report = reaper_worker::server::run(config).await.map_err(|e| {
        error!(error = %e, code = e.error_code(), "Worker stopped with an error");
        e
    })?;

    info!(exit = ?report.exit, "Worker stopped");
    Ok(())
}

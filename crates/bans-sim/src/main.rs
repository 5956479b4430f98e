//! Ban store simulator entry point
//!
//! Run with:
//! ```bash
//! BANS_SIM_CALLS=500 cargo run -p bans-sim
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use bans_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Simulation failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Configuration comes first so the log format can follow the environment
    let config = AppConfig::from_env().inspect_err(|e| eprintln!("Failed to load configuration: {e}"))?;

    let tracing_config = if config.app.env.is_production() {
        TracingConfig::production()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = try_init_tracing_with_config(tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        store = %config.store.name,
        calls = config.simulation.calls,
        concurrency = config.simulation.concurrency,
        "Configuration loaded"
    );

    let report = bans_sim::run(&config).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

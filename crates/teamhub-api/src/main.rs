//! TeamHub API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p teamhub-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use teamhub_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            if let Err(te) = try_init_tracing() {
                eprintln!("Warning: Failed to initialize tracing: {te}");
            }
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        port = config.api.port,
        "Configuration loaded"
    );

    if let Err(e) = teamhub_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

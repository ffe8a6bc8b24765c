//! # Catalog Server
//!
//! Entry point: loads layered configuration, installs logging, and serves
//! the catalog REST API until SIGINT or SIGTERM.

use catalog_config::ConfigLoader;
use catalog_server::startup::{init_logging, run};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.get().await,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.observability) {
        eprintln!("Failed to initialize logging: {e:#}");
        std::process::exit(1);
    }

    info!("Starting catalog server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    if let Err(e) = run(config).await {
        error!("Application error: {:#}", e);
        std::process::exit(1);
    }
}

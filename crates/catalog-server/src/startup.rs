//! Server startup: logging, migrations, and the serve loop.

use crate::app::AppContext;
use anyhow::Context;
use catalog_config::{AppConfig, ObservabilityConfig};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `observability.log_level` when it is set.
pub fn init_logging(config: &ObservabilityConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{},tower_http=debug", config.log_level)))
        .context("invalid log filter")?;

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };
    installed.context("failed to install tracing subscriber")
}

/// Logs where the server can be reached.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    info!("{}", separator);
    info!("REST API:  http://{}", addr);
    info!("Health:    http://{}/health", addr);
    info!("API Docs:  http://{}/swagger-ui", addr);
    info!("Execution: {}", config.service.execution_mode);
    info!("{}", separator);
}

/// Builds the application and serves HTTP until a shutdown signal arrives.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let context = AppContext::build(config)
        .await
        .context("failed to initialize application")?;

    if context.config().database.run_migrations {
        context
            .pool()
            .run_migrations()
            .await
            .context("failed to run database migrations")?;
    }

    let addr = context.config().server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    print_startup_info(context.config());

    axum::serve(listener, context.router())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("REST server error")?;

    context.pool().close().await;
    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}

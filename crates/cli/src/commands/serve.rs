//! Serve command implementation
//!
//! This module implements the `itemsvc serve` command: it sets up tracing,
//! builds the server configuration and runs the HTTP server until Ctrl+C or
//! SIGTERM.

use anyhow::{Context, Result};
use itemsvc_adapters::{HttpServer, ServerConfig};
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor `--log-level` is given
pub const DEFAULT_LOG_FILTER: &str =
    "warn,itemsvc=info,itemsvc_adapters=info,itemsvc_store=info,tower_http=info";

/// Arguments for the serve command
pub struct ServeArgs {
    /// IP address to listen on
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Start with the demo items
    pub seed: bool,
    /// Log filter used when RUST_LOG is unset
    pub log_level: String,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            seed: self.seed,
        }
    }
}

/// Execute the serve command
pub async fn execute_serve_command(args: ServeArgs) -> Result<()> {
    init_tracing(&args.log_level)?;

    let config = args.server_config();
    let addr = config
        .socket_addr()
        .context("Invalid listen address")?;

    info!(%addr, seed = config.seed, "Starting item service");

    let server = HttpServer::new(config);
    server
        .run(wait_for_shutdown())
        .await
        .context("Item service failed")?;

    info!("Item service shutdown complete");
    Ok(())
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
fn init_tracing(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log level '{}'", level))?,
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn wait_for_shutdown() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

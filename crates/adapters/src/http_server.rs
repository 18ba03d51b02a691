//! HTTP server
//!
//! Binds a TCP listener and serves the item router until the shutdown
//! future resolves.

use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

use itemsvc_store::ItemStore;

use crate::router::create_router;

/// Server-level errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid listen host '{host}': expected an IP address")]
    InvalidHost { host: String },

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("Server error: {source}")]
    Serve { source: std::io::Error },
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// IP address to listen on
    pub host: String,
    /// Port to listen on (0 picks a free port)
    pub port: u16,
    /// Start with the three demo items instead of an empty store
    pub seed: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            seed: false,
        }
    }
}

impl ServerConfig {
    /// Resolve host and port into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let ip: IpAddr = self.host.parse().map_err(|_| ServerError::InvalidHost {
            host: self.host.clone(),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// HTTP server owning the process-wide item store.
pub struct HttpServer {
    config: ServerConfig,
    store: Arc<ItemStore>,
}

impl HttpServer {
    /// Creates a new [`HttpServer`], seeding the store if the configuration asks for it.
    pub fn new(config: ServerConfig) -> Self {
        let store = if config.seed {
            ItemStore::seeded()
        } else {
            ItemStore::new()
        };
        Self::with_store(config, Arc::new(store))
    }

    /// Creates a server around an existing store.
    pub fn with_store(config: ServerConfig, store: Arc<ItemStore>) -> Self {
        Self { config, store }
    }

    /// Access the configuration associated with this server.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Shared store served by this server.
    pub fn store(&self) -> &Arc<ItemStore> {
        &self.store
    }

    /// Router serving this server's store.
    pub fn router(&self) -> Router {
        create_router(Arc::clone(&self.store))
    }

    /// Bind the configured address.
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        let addr = self.config.socket_addr()?;
        TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = self.bind().await?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Ok(addr) = listener.local_addr() {
            info!(
                "Serving items on http://{} ({} items)",
                addr,
                self.store.len().await
            );
        }

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|source| ServerError::Serve { source })?;

        info!("HTTP server stopped");
        Ok(())
    }
}

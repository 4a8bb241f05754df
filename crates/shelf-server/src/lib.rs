//! HTTP server for the Shelf documentation browser.
//!
//! Serves a pre-built [`Corpus`] over HTTP using axum:
//! - `GET /` lists every namespace
//! - `GET /{namespace}` and `GET /.../{namespace}/...` render a tree node
//!   inside the page shell
//! - any other method answers `404 not found`
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use shelf_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         corpus_path: PathBuf::from("corpus.json"),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (shelf-server)
//!                        │
//!                        └─► docs handler
//!                               │
//!                               ├─► Corpus::browse   (shelf-corpus)
//!                               ├─► render_node      (shelf-corpus)
//!                               └─► markdown + shell (shelf-render)
//! ```
//!
//! The corpus is loaded once and shared read-only by every request.

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use shelf_corpus::Corpus;

pub use app::create_router;
pub use error::ServerError;
pub use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Corpus JSON file.
    pub corpus_path: PathBuf,
    /// Public URL for generated links (`None` uses the request `Host` header).
    pub base_url: Option<String>,
    /// Application version (part of page `ETag`s).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8080,
            corpus_path: PathBuf::from("corpus.json"),
            base_url: None,
            version: String::new(),
        }
    }
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the corpus cannot be loaded or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let corpus = Arc::new(Corpus::load(&config.corpus_path)?);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    let state = Arc::new(AppState::new(
        corpus,
        config.base_url.clone(),
        addr.to_string(),
        config.version.clone(),
    ));
    let app = create_router(state);

    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Shelf config.
#[must_use]
pub fn server_config_from_shelf_config(
    config: &shelf_config::Config,
    version: String,
) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        corpus_path: config.corpus_resolved.path.clone(),
        base_url: config.server.base_url.clone(),
        version,
    }
}

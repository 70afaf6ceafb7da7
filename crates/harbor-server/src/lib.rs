//! HTTP server for the Harbor documentation engine.
//!
//! This crate provides a native Rust HTTP server using axum, exposing a
//! read-only JSON API over a tree of markdown documents:
//!
//! - `GET /api/structure/{path}` — ordered directory listings
//! - `GET /api/related?path=..` — tag-based related-document ranking
//! - `GET /api/health` — liveness and version
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use harbor_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         source_dir: PathBuf::from("docs"),
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
//! Frontend ──HTTP──► axum router (harbor-server)
//!                        │
//!                        ├─► /api/structure ──► ContentTreeBuilder
//!                        │
//!                        └─► /api/related ────► RelevanceEngine
//!                                                   │
//!                                                   └─► RelatedCache (TTL)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Documentation source directory (the content root).
    pub source_dir: PathBuf,
    /// File extensions served from the content tree (without dots).
    pub extensions: Vec<String>,
    /// Filename for per-directory sidecar metadata files.
    pub meta_filename: String,
    /// Default number of related documents returned.
    pub default_limit: usize,
    /// Related-cache entry lifetime.
    pub cache_ttl: Duration,
    /// Whether the related-documents cache is consulted.
    pub cache_enabled: bool,
    /// Cache entry count above which a write triggers an expiry sweep.
    pub sweep_threshold: usize,
    /// Enable verbose output (error details in 500 responses).
    pub verbose: bool,
    /// Application version.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
            source_dir: PathBuf::from("docs"),
            extensions: vec!["md".to_owned()],
            meta_filename: "meta.yaml".to_owned(),
            default_limit: 5,
            cache_ttl: Duration::from_secs(300),
            cache_enabled: true,
            sweep_threshold: 100,
            verbose: false,
            version: String::new(),
        }
    }
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    let state = Arc::new(AppState::from_config(&config));
    let app = app::create_router(state);

    tracing::info!(address = %addr, source = %config.source_dir.display(), "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from a Harbor config.
#[must_use]
pub fn server_config_from_config(
    config: &harbor_config::Config,
    version: String,
    verbose: bool,
) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        source_dir: config.content_resolved.source_dir.clone(),
        extensions: config.content_resolved.extensions.clone(),
        meta_filename: config.content_resolved.meta_filename.clone(),
        default_limit: config.related.default_limit,
        cache_ttl: Duration::from_secs(config.related.ttl_seconds),
        cache_enabled: config.related.cache_enabled,
        sweep_threshold: config.related.sweep_threshold,
        verbose,
        version,
    }
}

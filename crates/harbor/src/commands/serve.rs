//! `harbor serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use harbor_config::{CliSettings, Config};
use harbor_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover harbor.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (show error details in responses).
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable the related-documents cache (default: enabled).
    #[arg(long)]
    cache: Option<bool>,

    /// Disable the related-documents cache.
    #[arg(long, conflicts_with = "cache")]
    no_cache: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        // Resolve flags before moving into CliSettings
        let cache_enabled = self.resolve_cache_enabled();

        // Build CLI settings from args
        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            source_dir: self.source_dir,
            cache_enabled,
        };

        // Load config
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        // Print startup info
        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Source directory: {}",
            config.content_resolved.source_dir.display()
        ));
        if config.related.cache_enabled {
            output.info(&format!(
                "Related cache: enabled (ttl {}s)",
                config.related.ttl_seconds
            ));
        } else {
            output.info("Related cache: disabled");
        }

        // Build server config and run
        let server_config = server_config_from_config(&config, version.to_owned(), self.verbose);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))
    }

    /// Resolve the cache flag pair into an override value.
    fn resolve_cache_enabled(&self) -> Option<bool> {
        if self.no_cache {
            Some(false)
        } else {
            self.cache
        }
    }
}

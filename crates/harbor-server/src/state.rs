//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use harbor_content::{ContentTreeBuilder, PathResolver, TreeOptions};
use harbor_related::{RelatedCache, RelevanceEngine};

use crate::ServerConfig;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Ordered directory listings.
    pub(crate) tree: ContentTreeBuilder,
    /// Related-document ranking.
    pub(crate) engine: RelevanceEngine,
    /// Shared ranking cache; exposed for lifecycle management.
    pub(crate) cache: Arc<RelatedCache>,
    /// Whether the cache is consulted at all.
    pub(crate) cache_enabled: bool,
    /// Default `limit` for related-document requests.
    pub(crate) default_limit: usize,
    /// Enable verbose output (error details in 500 responses).
    pub(crate) verbose: bool,
    /// Application version.
    pub(crate) version: String,
}

impl AppState {
    /// Build the component graph from a server configuration.
    pub(crate) fn from_config(config: &ServerConfig) -> Self {
        let resolver = PathResolver::new(config.source_dir.clone());
        let cache = Arc::new(RelatedCache::with_sweep_threshold(
            config.cache_ttl,
            config.sweep_threshold,
        ));

        let tree = ContentTreeBuilder::with_options(
            resolver.clone(),
            TreeOptions {
                extensions: config.extensions.clone(),
                meta_filename: config.meta_filename.clone(),
            },
        );
        let engine = RelevanceEngine::new(resolver, Arc::clone(&cache))
            .with_extensions(config.extensions.clone());

        Self {
            tree,
            engine,
            cache,
            cache_enabled: config.cache_enabled,
            default_limit: config.default_limit,
            verbose: config.verbose,
            version: config.version.clone(),
        }
    }
}

//! Configuration management for docsift.
//!
//! This module loads configuration from process environment variables and
//! merges command-line overrides on top. The variable names follow the
//! deployment's `.env` conventions (`OPENAI_API_KEY`, `SUPABASE_URL`, ...).
//!
//! Missing credentials are deliberately NOT a load error: the affected
//! external call fails at runtime and is absorbed by the pipeline's
//! failure-isolation rules. `load()` only rejects values that are present
//! but malformed (e.g. a non-numeric concurrency).

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Default sitemap crawled when none is configured.
pub const DEFAULT_SITEMAP_URL: &str = "https://docs.astral.sh/uv/sitemap.xml";

/// Main application configuration.
///
/// This struct holds all global options that affect a crawl run. It is
/// built once at startup and threaded into the pipeline explicitly; there
/// are no process-wide singletons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Completion/embedding provider ("openai" or "mock")
    pub provider: String,

    /// Completion model identifier
    pub model: String,

    /// Embedding model identifier
    pub embedding_model: String,

    /// Embedding vector dimension
    pub embedding_dimensions: usize,

    /// API key for the completion/embedding provider
    pub api_key: Option<String>,

    /// Base URL for the completion/embedding API
    pub api_base_url: Option<String>,

    /// Base URL of the chunk store (PostgREST-style endpoint)
    pub store_url: Option<String>,

    /// Service key for the chunk store
    pub store_key: Option<String>,

    /// Sitemap URL to discover pages from
    pub sitemap_url: String,

    /// Maximum number of URLs processed concurrently
    pub concurrency: usize,

    /// Target chunk size in characters
    pub chunk_size: usize,

    /// Source tag recorded in each chunk's metadata
    pub source_tag: String,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            embedding_dimensions: 1536,
            api_key: None,
            api_base_url: None,
            store_url: None,
            store_key: None,
            sitemap_url: DEFAULT_SITEMAP_URL.to_string(),
            concurrency: 5,
            chunk_size: 5000,
            source_tag: "docs".to_string(),
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `DOCSIFT_PROVIDER`: completion/embedding provider
    /// - `LLM_MODEL`: completion model
    /// - `EMBEDDING_MODEL`: embedding model
    /// - `EMBEDDING_DIMENSIONS`: embedding vector dimension
    /// - `OPENAI_API_KEY`: provider API key
    /// - `OPENAI_BASE_URL`: provider base URL
    /// - `SUPABASE_URL`: chunk store base URL
    /// - `SUPABASE_SERVICE_KEY`: chunk store service key
    /// - `SITEMAP_URL`: sitemap to crawl
    /// - `CRAWL_CONCURRENCY`: URL concurrency ceiling
    /// - `CHUNK_SIZE`: target chunk size in characters
    /// - `SOURCE_TAG`: metadata source tag
    /// - `RUST_LOG`: log level
    /// - `NO_COLOR`: disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(provider) = std::env::var("DOCSIFT_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("LLM_MODEL") {
            config.model = model;
        }

        if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
            config.embedding_model = model;
        }

        if let Ok(dims) = std::env::var("EMBEDDING_DIMENSIONS") {
            config.embedding_dimensions = parse_env_usize("EMBEDDING_DIMENSIONS", &dims)?;
        }

        config.api_key = std::env::var("OPENAI_API_KEY").ok();
        config.api_base_url = std::env::var("OPENAI_BASE_URL").ok();
        config.store_url = std::env::var("SUPABASE_URL").ok();
        config.store_key = std::env::var("SUPABASE_SERVICE_KEY").ok();

        if let Ok(url) = std::env::var("SITEMAP_URL") {
            config.sitemap_url = url;
        }

        if let Ok(limit) = std::env::var("CRAWL_CONCURRENCY") {
            config.concurrency = parse_env_usize("CRAWL_CONCURRENCY", &limit)?;
        }

        if let Ok(size) = std::env::var("CHUNK_SIZE") {
            config.chunk_size = parse_env_usize("CHUNK_SIZE", &size)?;
        }

        if let Ok(tag) = std::env::var("SOURCE_TAG") {
            config.source_tag = tag;
        }

        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// This method merges command-line flags with the loaded configuration,
    /// giving precedence to CLI flags over environment variables.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        provider: Option<String>,
        model: Option<String>,
        sitemap_url: Option<String>,
        concurrency: Option<usize>,
        chunk_size: Option<usize>,
        source_tag: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(url) = sitemap_url {
            self.sitemap_url = url;
        }

        if let Some(limit) = concurrency {
            self.concurrency = limit;
        }

        if let Some(size) = chunk_size {
            self.chunk_size = size;
        }

        if let Some(tag) = source_tag {
            self.source_tag = tag;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate configuration before a crawl starts.
    pub fn validate(&self) -> AppResult<()> {
        let known_providers = ["openai", "mock"];

        if !known_providers.contains(&self.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                known_providers.join(", ")
            )));
        }

        if self.concurrency == 0 {
            return Err(AppError::Config(
                "Concurrency must be greater than zero".to_string(),
            ));
        }

        if self.chunk_size == 0 {
            return Err(AppError::Config(
                "Chunk size must be greater than zero".to_string(),
            ));
        }

        if self.embedding_dimensions == 0 {
            return Err(AppError::Config(
                "Embedding dimensions must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_env_usize(name: &str, value: &str) -> AppResult<usize> {
    value
        .parse::<usize>()
        .map_err(|_| AppError::Config(format!("Invalid value for {}: {:?}", name, value)))
}

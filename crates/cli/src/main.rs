//! docsift CLI
//!
//! Main entry point for the docsift command-line tool.
//! Crawls a documentation sitemap into a vector table.

mod commands;

use clap::Parser;
use commands::CrawlCommand;
use docsift_core::{config::AppConfig, logging, AppResult};

/// docsift - crawl documentation sitemaps into vector tables
#[derive(Parser, Debug)]
#[command(name = "docsift")]
#[command(about = "Crawl a documentation sitemap into a vector table", long_about = None)]
#[command(version)]
struct Cli {
    /// Completion/embedding provider (openai, mock)
    #[arg(short, long, env = "DOCSIFT_PROVIDER")]
    provider: Option<String>,

    /// Completion model identifier
    #[arg(short, long, env = "LLM_MODEL")]
    model: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    no_color: bool,

    #[command(flatten)]
    crawl: CrawlCommand,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.provider,
        cli.model,
        cli.crawl.sitemap.clone(),
        cli.crawl.concurrency,
        cli.crawl.chunk_size,
        cli.crawl.source_tag.clone(),
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    // Log startup
    tracing::info!("docsift starting");
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);
    tracing::debug!("Sitemap: {}", config.sitemap_url);

    let _span = tracing::info_span!("command", name = "crawl").entered();

    let result = cli.crawl.execute(&config).await;

    // Log completion; a fatal error here is the only path to a non-zero exit
    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}

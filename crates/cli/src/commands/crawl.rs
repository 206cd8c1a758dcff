//! Crawl command handler.

use clap::Args;
use docsift_core::{config::AppConfig, AppResult};

/// Crawl a documentation sitemap into a vector table
#[derive(Args, Debug)]
pub struct CrawlCommand {
    /// Destination table for ingested chunks
    pub table: String,

    /// Sitemap URL to crawl
    #[arg(long, env = "SITEMAP_URL")]
    pub sitemap: Option<String>,

    /// Maximum number of URLs processed concurrently
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Target chunk size in characters
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Source tag recorded in chunk metadata
    #[arg(long)]
    pub source_tag: Option<String>,

    /// Output the crawl summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl CrawlCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing crawl into table '{}'", self.table);

        let stats = docsift_ingest::run(config, &self.table).await?;

        if self.json {
            let output = serde_json::json!({
                "table": self.table,
                "pages": stats.pages,
                "ingested": stats.ingested,
                "skipped": stats.skipped,
                "failed": stats.failed,
            });
            println!("{}", serde_json::to_string_pretty(&output).unwrap());
        } else {
            println!(
                "Ingested {} of {} pages into '{}' ({} skipped, {} failed)",
                stats.ingested, stats.pages, self.table, stats.skipped, stats.failed
            );
        }

        Ok(())
    }
}

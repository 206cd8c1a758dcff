//! Documentation ingestion pipeline.
//!
//! Crawls pages discovered from a sitemap, splits each page's text into
//! boundary-aware chunks, derives a title/summary and embedding per chunk,
//! and persists the rows keyed by (url, chunk_number).

pub mod chunker;
pub mod crawler;
pub mod enrich;
pub mod htmltext;
pub mod ingestor;
pub mod render;
pub mod sitemap;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use chunker::{chunk_text, DEFAULT_CHUNK_SIZE};
pub use crawler::CrawlCoordinator;
pub use enrich::ChunkEnricher;
pub use ingestor::DocumentIngestor;
pub use render::{HttpRenderer, PageRenderer};
pub use store::{ChunkStore, MemoryChunkStore, RestChunkStore};
pub use types::{ChunkRecord, CrawlStats, DocumentStats};

use docsift_core::{AppConfig, AppError, AppResult};
use docsift_llm::{create_completion, create_embedder};
use std::sync::Arc;

/// Run a full crawl into the given table.
///
/// This is the fatal tier: a bad configuration, an unreachable sitemap, or
/// an empty URL list surfaces as an error here and the batch never starts.
/// Once the crawl is underway, per-URL and per-chunk failures are absorbed
/// and logged by the pipeline.
pub async fn run(config: &AppConfig, table: &str) -> AppResult<CrawlStats> {
    config.validate()?;

    let client = reqwest::Client::new();
    let urls = sitemap::fetch_sitemap_urls(&client, &config.sitemap_url).await?;
    if urls.is_empty() {
        return Err(AppError::Crawl("No URLs found in sitemap".to_string()));
    }

    tracing::info!("Starting crawl for {} with {} URLs", table, urls.len());

    let completion = create_completion(
        &config.provider,
        config.api_base_url.as_deref(),
        config.api_key.clone(),
    )?;
    let embedder = create_embedder(
        &config.provider,
        config.api_base_url.as_deref(),
        config.api_key.clone(),
        &config.embedding_model,
        config.embedding_dimensions,
    )?;

    let enricher = ChunkEnricher::new(
        completion,
        embedder,
        config.model.clone(),
        config.source_tag.clone(),
    );
    let store = Arc::new(RestChunkStore::new(
        config.store_url.clone(),
        config.store_key.clone(),
    )?);
    let ingestor = Arc::new(DocumentIngestor::new(
        enricher,
        store,
        table,
        config.chunk_size,
    ));
    let renderer = Arc::new(HttpRenderer::new()?);

    let coordinator = CrawlCoordinator::new(renderer, ingestor, config.concurrency);
    let stats = coordinator.crawl_all(&urls).await;

    tracing::info!(
        "Crawl finished: {} pages, {} ingested, {} skipped, {} failed",
        stats.pages,
        stats.ingested,
        stats.skipped,
        stats.failed
    );

    Ok(stats)
}

//! Per-document ingestion: chunk, enrich, persist.

use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::chunker;
use crate::enrich::ChunkEnricher;
use crate::store::ChunkStore;
use crate::types::DocumentStats;

/// Ingests one document at a time: splits it into chunks, enriches each
/// chunk in order, then persists all chunks of the document together.
///
/// Chunks are enriched sequentially so chunk numbering follows split order;
/// the resulting storage calls are fanned out and awaited together once the
/// last chunk is enriched. A failed store write is logged and dropped —
/// it never affects sibling chunks, and `ingest` never fails.
pub struct DocumentIngestor {
    enricher: ChunkEnricher,
    store: Arc<dyn ChunkStore>,
    table: String,
    chunk_size: usize,
}

impl DocumentIngestor {
    /// Create an ingestor writing to the given table.
    pub fn new(
        enricher: ChunkEnricher,
        store: Arc<dyn ChunkStore>,
        table: impl Into<String>,
        chunk_size: usize,
    ) -> Self {
        Self {
            enricher,
            store,
            table: table.into(),
            chunk_size,
        }
    }

    /// Process one document and store its chunks.
    pub async fn ingest(&self, url: &str, text: &str) -> DocumentStats {
        let chunks = chunker::chunk_text(text, self.chunk_size);
        let total = chunks.len();
        debug!(url, "Split into {} chunks", total);

        let mut store_tasks = Vec::with_capacity(total);
        for (chunk_number, content) in chunks.iter().enumerate() {
            let record = self.enricher.enrich(content, chunk_number, url).await;

            store_tasks.push(async move {
                match self.store.insert_chunk(&self.table, &record).await {
                    Ok(()) => {
                        debug!(
                            "Inserted chunk {} for {}",
                            record.chunk_number, record.url
                        );
                        true
                    }
                    Err(e) => {
                        warn!(
                            url = %record.url,
                            chunk_number = record.chunk_number,
                            "Error inserting chunk: {}",
                            e
                        );
                        false
                    }
                }
            });
        }

        let stored = join_all(store_tasks)
            .await
            .into_iter()
            .filter(|ok| *ok)
            .count();

        info!("Stored {}/{} chunks for {}", stored, total, url);
        DocumentStats {
            chunks: total,
            stored,
        }
    }
}

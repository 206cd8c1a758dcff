//! Ingestion pipeline type definitions.

use serde::{Deserialize, Serialize};

/// A fully derived chunk, ready for persistence.
///
/// Identity is (url, chunk_number); chunk numbers are 0-based and assigned
/// in split order, so they are contiguous per url.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Source page URL
    pub url: String,

    /// Zero-based index of this chunk within its page
    pub chunk_number: usize,

    /// Derived title
    pub title: String,

    /// Derived summary
    pub summary: String,

    /// Raw chunk text
    pub content: String,

    /// Metadata: source tag, url, chunk_number, derivation timestamp
    pub metadata: serde_json::Value,

    /// Embedding vector (zero vector when the backend call failed)
    pub embedding: Vec<f32>,
}

/// Outcome summary for one ingested document.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentStats {
    /// Chunks produced by the splitter
    pub chunks: usize,

    /// Chunks successfully written to the store
    pub stored: usize,
}

/// Outcome summary for a whole crawl.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrawlStats {
    /// URLs dispatched
    pub pages: usize,

    /// URLs that produced at least one stored chunk
    pub ingested: usize,

    /// URLs skipped because they rendered to empty text
    pub skipped: usize,

    /// URLs that failed to render
    pub failed: usize,
}

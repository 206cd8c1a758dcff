//! Chunk persistence.
//!
//! The destination is a PostgREST-style vector table; the table name is a
//! runtime parameter so one deployment can maintain several corpora.
//! Uniqueness of (url, chunk_number) is the store's responsibility.

use crate::types::ChunkRecord;
use chrono::Utc;
use docsift_core::{AppError, AppResult};
use std::time::Duration;

/// Request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Trait for chunk stores.
#[async_trait::async_trait]
pub trait ChunkStore: Send + Sync {
    /// Insert one enriched chunk into the named table.
    async fn insert_chunk(&self, table: &str, chunk: &ChunkRecord) -> AppResult<()>;
}

/// Chunk store backed by a PostgREST endpoint (`{base}/rest/v1/{table}`).
pub struct RestChunkStore {
    base_url: Option<String>,
    service_key: Option<String>,
    client: reqwest::Client,
}

impl RestChunkStore {
    /// Create a store client. Missing endpoint or key is not an error
    /// here — the insert call fails instead and is absorbed per chunk.
    pub fn new(base_url: Option<String>, service_key: Option<String>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Store(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.map(|u| u.trim_end_matches('/').to_string()),
            service_key,
            client,
        })
    }
}

#[async_trait::async_trait]
impl ChunkStore for RestChunkStore {
    async fn insert_chunk(&self, table: &str, chunk: &ChunkRecord) -> AppResult<()> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or_else(|| AppError::Store("SUPABASE_URL is not set".to_string()))?;
        let service_key = self
            .service_key
            .as_deref()
            .ok_or_else(|| AppError::Store("SUPABASE_SERVICE_KEY is not set".to_string()))?;

        let url = format!("{}/rest/v1/{}", base_url, table);
        let row = serde_json::json!({
            "url": chunk.url,
            "chunk_number": chunk.chunk_number,
            "title": chunk.title,
            "summary": chunk.summary,
            "content": chunk.content,
            "metadata": chunk.metadata,
            "embedding": chunk.embedding,
            "created_at": Utc::now().to_rfc3339(),
        });

        let response = self
            .client
            .post(&url)
            .header("apikey", service_key)
            .bearer_auth(service_key)
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await
            .map_err(|e| AppError::Store(format!("Insert request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Store(format!(
                "Insert into '{}' failed ({}): {}",
                table, status, error_text
            )));
        }

        Ok(())
    }
}

/// In-memory chunk store for tests and dry runs.
#[derive(Default)]
pub struct MemoryChunkStore {
    rows: std::sync::Mutex<Vec<(String, ChunkRecord)>>,
}

impl MemoryChunkStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all inserted (table, record) rows.
    pub fn rows(&self) -> Vec<(String, ChunkRecord)> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ChunkStore for MemoryChunkStore {
    async fn insert_chunk(&self, table: &str, chunk: &ChunkRecord) -> AppResult<()> {
        self.rows
            .lock()
            .unwrap()
            .push((table.to_string(), chunk.clone()));
        Ok(())
    }
}

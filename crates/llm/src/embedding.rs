//! Embedding backend trait.

use docsift_core::AppResult;

/// Trait for embedding backends.
#[async_trait::async_trait]
pub trait EmbeddingBackend: Send + Sync + std::fmt::Debug {
    /// Get provider name (e.g., "openai", "mock")
    fn provider_name(&self) -> &str;

    /// Get model identifier
    fn model_name(&self) -> &str;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Generate an embedding vector for a text.
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>>;
}

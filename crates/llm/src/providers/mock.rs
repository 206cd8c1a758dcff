//! Deterministic offline backend for tests and dry runs.

use crate::client::{ChatRequest, ChatResponse, CompletionBackend};
use crate::embedding::EmbeddingBackend;
use docsift_core::AppResult;

/// Mock backend implementing both completion and embedding.
///
/// Completions return a canned JSON object derived from the request
/// content; embeddings are content-dependent unit vectors built from
/// word hashes. Not semantically meaningful, but deterministic, which is
/// what tests and offline runs need.
#[derive(Debug)]
pub struct MockBackend {
    dimensions: usize,
}

impl MockBackend {
    /// Create a new mock backend with the given embedding dimensions.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn generate_embedding(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.dimensions];

        for word in text.to_lowercase().split_whitespace() {
            let hash = word
                .bytes()
                .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
            embedding[(hash as usize) % self.dimensions] += 1.0;
        }

        // Normalize to unit vector
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut embedding {
                *v /= norm;
            }
        }

        embedding
    }
}

#[async_trait::async_trait]
impl CompletionBackend for MockBackend {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
        let first_line = request.user.lines().next().unwrap_or("").trim();
        let title: String = first_line.chars().take(80).collect();

        let content = serde_json::json!({
            "title": title,
            "summary": format!("{} characters of content", request.user.len()),
        })
        .to_string();

        Ok(ChatResponse {
            content,
            model: request.model.clone(),
        })
    }
}

#[async_trait::async_trait]
impl EmbeddingBackend for MockBackend {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-hash-v1"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        Ok(self.generate_embedding(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_embedding_dimensions_and_norm() {
        let backend = MockBackend::new(64);
        let embedding = backend.embed("hello world").await.unwrap();

        assert_eq!(embedding.len(), 64);
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_mock_embedding_deterministic() {
        let backend = MockBackend::new(64);
        let a = backend.embed("same text").await.unwrap();
        let b = backend.embed("same text").await.unwrap();
        assert_eq!(a, b);

        let c = backend.embed("different text").await.unwrap();
        assert_ne!(a, c);
    }

    #[tokio::test]
    async fn test_mock_embedding_empty_text() {
        let backend = MockBackend::new(64);
        let embedding = backend.embed("").await.unwrap();
        assert!(embedding.iter().all(|&x| x == 0.0));
    }

    #[tokio::test]
    async fn test_mock_completion_is_json() {
        let backend = MockBackend::new(64);
        let request = ChatRequest::new("URL: https://x/a\n\nContent:\nBody", "mock-model");
        let response = backend.complete(&request).await.unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&response.content).unwrap();
        assert!(parsed.get("title").is_some());
        assert!(parsed.get("summary").is_some());
    }
}
